use super::EVENT_PREFIX;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Server notification an event handler can be registered for
///
/// Names are case-insensitive: `"DownloadStart"`, `"downloadstart"` and
/// [`Aria2Event::DownloadStart`] all address the same handler slot. Names
/// aria2 does not document land in [`Aria2Event::Custom`], lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Aria2Event {
    DownloadStart,
    DownloadPause,
    DownloadStop,
    DownloadComplete,
    DownloadError,
    BtDownloadComplete,
    /// Generic error handler: receives the error payload of every failed call
    Error,
    Custom(String),
}

impl Aria2Event {
    /// Resolve an event name such as `"DownloadStart"`
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "downloadstart" => Aria2Event::DownloadStart,
            "downloadpause" => Aria2Event::DownloadPause,
            "downloadstop" => Aria2Event::DownloadStop,
            "downloadcomplete" => Aria2Event::DownloadComplete,
            "downloaderror" => Aria2Event::DownloadError,
            "btdownloadcomplete" => Aria2Event::BtDownloadComplete,
            "error" => Aria2Event::Error,
            _ => Aria2Event::Custom(lower),
        }
    }

    /// Resolve a notification method such as `"aria2.onDownloadStart"`
    ///
    /// Returns `None` for methods outside the `aria2.on` namespace.
    pub fn from_method(method: &str) -> Option<Self> {
        method
            .to_lowercase()
            .strip_prefix(EVENT_PREFIX)
            .map(Self::from_name)
    }

    /// Lowercase event name without the namespace
    pub fn name(&self) -> &str {
        match self {
            Aria2Event::DownloadStart => "downloadstart",
            Aria2Event::DownloadPause => "downloadpause",
            Aria2Event::DownloadStop => "downloadstop",
            Aria2Event::DownloadComplete => "downloadcomplete",
            Aria2Event::DownloadError => "downloaderror",
            Aria2Event::BtDownloadComplete => "btdownloadcomplete",
            Aria2Event::Error => "error",
            Aria2Event::Custom(name) => name,
        }
    }

    /// Registry key, e.g. `aria2.ondownloadstart`
    pub fn key(&self) -> String {
        format!("{}{}", EVENT_PREFIX, self.name())
    }
}

impl fmt::Display for Aria2Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for Aria2Event {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for Aria2Event {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Aria2Event {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}
