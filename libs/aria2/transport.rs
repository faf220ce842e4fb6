use resocket::{ReconnectingSocket, SocketError};
use std::sync::Arc;

/// What a [`Session`](crate::Session) needs from its connection
///
/// Connection state and retry progress reach the session as notifications,
/// so sending is all it asks of the transport itself.
pub trait Transport {
    /// Hand a text frame to the connection
    fn send(&self, frame: String) -> Result<(), SocketError>;
}

impl Transport for ReconnectingSocket {
    fn send(&self, frame: String) -> Result<(), SocketError> {
        ReconnectingSocket::send(self, frame)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, frame: String) -> Result<(), SocketError> {
        (**self).send(frame)
    }
}
