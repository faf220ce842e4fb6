//! Session behaviour driven through an in-memory transport

#[macro_use]
mod common;

use aria2::{Aria2Event, ConnectionState, Route, SessionError, MAX_RETRIES};
use common::{open_session, recording_callback, recording_handler, session};
use serde_json::json;
use std::collections::HashSet;

#[test]
fn test_calls_queued_while_disconnected_flush_in_order() {
    let (mut session, transport) = session(None);
    session.begin_connect();
    assert_eq!(session.state(), ConnectionState::Connecting);

    session
        .send("tellActive", None, None)
        .send("tellStopped", Some(vec![json!(0), json!(10)]), None)
        .send("addUri", Some(vec![json!(["http://example.com/a.iso"])]), None);

    assert!(transport.frames().is_empty());
    assert_eq!(session.queued_count(), 3);

    session.on_open();

    assert_eq!(
        transport.methods(),
        vec!["aria2.tellActive", "aria2.tellStopped", "aria2.addUri"]
    );
    assert_eq!(session.queued_count(), 0);

    let ids: HashSet<String> = (0..3).map(|i| transport.id_of(i)).collect();
    assert_eq!(ids.len(), 3);

    let frames = transport.frames();
    assert_eq!(frames[1]["params"], json!([0, 10]));
    verbose_println!("flushed frames: {:?}", frames);
}

#[test]
fn test_response_resolves_pending_callback_once() {
    let (mut session, transport) = open_session(None);
    let (callback, replies) = recording_callback();

    session.send("getVersion", None, callback);
    assert_eq!(session.pending_count(), 1);

    let id = transport.id_of(0);
    let response = json!({"id": id, "jsonrpc": "2.0", "result": {"version": "1.37.0"}}).to_string();

    assert_eq!(
        session.handle_message(&response).unwrap(),
        Route::Reply { id: id.clone() }
    );
    assert_eq!(session.handle_message(&response).unwrap(), Route::Dropped);

    let replies = replies.lock();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0], Ok(json!({"version": "1.37.0"})));
    assert_eq!(session.pending_count(), 0);
}

#[test]
fn test_later_event_registration_wins() {
    let (mut session, _transport) = open_session(None);
    let (first, first_seen) = recording_handler();
    let (second, second_seen) = recording_handler();

    session.on("Download", first).on("DOWNLOAD", second);

    let route = session
        .handle_message(r#"{"jsonrpc":"2.0","method":"aria2.onDownload","params":[]}"#)
        .unwrap();

    assert_eq!(route, Route::Event(Aria2Event::Custom("download".to_string())));
    assert!(first_seen.lock().is_empty());
    assert_eq!(*second_seen.lock(), vec![json!([])]);
}

#[test]
fn test_token_is_first_param() {
    let (mut session, transport) = open_session(Some("s3cret"));
    session
        .send("tellStatus", Some(vec![json!("2089b05ecca3d829"), json!(["gid"])]), None)
        .send("getGlobalStat", None, None);

    let frames = transport.frames();
    assert_eq!(
        frames[0]["params"],
        json!(["token:s3cret", "2089b05ecca3d829", ["gid"]])
    );
    assert_eq!(frames[1]["params"], json!(["token:s3cret"]));
}

#[test]
fn test_params_start_with_caller_params_without_token() {
    let (mut session, transport) = open_session(None);
    session
        .send("remove", Some(vec![json!("2089b05ecca3d829")]), None)
        .send("getGlobalStat", None, None);

    let frames = transport.frames();
    assert_eq!(frames[0]["params"], json!(["2089b05ecca3d829"]));
    assert_eq!(frames[0]["jsonrpc"], "2.0");
    assert_eq!(frames[1]["params"], json!([]));
}

#[test]
fn test_download_start_event_reaches_handler() {
    let (mut session, _transport) = open_session(None);
    let (handler, seen) = recording_handler();
    session.on("DownloadStart", handler);

    let route = session
        .handle_message(r#"{"method":"aria2.onDownloadStart","params":[{"gid":"1"}]}"#)
        .unwrap();

    assert_eq!(route, Route::Event(Aria2Event::DownloadStart));
    assert_eq!(*seen.lock(), vec![json!([{"gid": "1"}])]);
}

#[test]
fn test_generic_error_handler_preempts_pending_callback() {
    let (mut session, transport) = open_session(None);
    let (error_handler, errors) = recording_handler();
    let (callback, replies) = recording_callback();

    session.on(Aria2Event::Error, error_handler);
    session.send("remove", Some(vec![json!("ffff")]), callback);

    let id = transport.id_of(0);
    let frame = json!({"id": id, "error": {"code": 1}}).to_string();

    assert_eq!(session.handle_message(&frame).unwrap(), Route::GenericError);
    assert_eq!(*errors.lock(), vec![json!({"code": 1})]);
    assert!(replies.lock().is_empty());
    assert_eq!(session.pending_count(), 1);
}

#[test]
fn test_error_without_generic_handler_goes_to_callback() {
    let (mut session, transport) = open_session(None);
    let (callback, replies) = recording_callback();
    session.send("remove", Some(vec![json!("ffff")]), callback);

    let id = transport.id_of(0);
    let frame = json!({"id": id, "error": {"code": 1, "message": "GID ffff is not found"}});
    let route = session.handle_message(&frame.to_string()).unwrap();

    assert_eq!(route, Route::Reply { id });
    let replies = replies.lock();
    let err = replies[0].as_ref().unwrap_err();
    assert_eq!(err.code(), Some(1));
    assert_eq!(err.message(), Some("GID ffff is not found"));
}

#[test]
fn test_fatal_signal_exactly_at_retry_budget() {
    let (mut session, transport) = session(None);
    session.begin_connect();

    for attempt in 0..MAX_RETRIES {
        assert!(session.on_error("connection refused", attempt).is_ok());
        assert_eq!(session.state(), ConnectionState::Retrying);
    }
    assert!(transport.frames().is_empty());

    let fatal = session.on_error("connection refused", MAX_RETRIES);
    assert!(matches!(
        fatal,
        Err(SessionError::RetryExhausted { attempts }) if attempts == MAX_RETRIES
    ));
    assert!(session.is_failed());

    assert!(session.on_error("connection refused", MAX_RETRIES + 1).is_ok());
    session.on_close();
    session.on_open();
    assert_eq!(session.state(), ConnectionState::Failed);
}

#[test]
fn test_close_queues_later_calls_until_reopen() {
    let (mut session, transport) = open_session(None);
    session.send("tellActive", None, None);

    session.on_close();
    assert_eq!(session.state(), ConnectionState::Retrying);

    session.send("pauseAll", None, None).send("unpauseAll", None, None);
    assert_eq!(transport.frames().len(), 1);
    assert_eq!(session.queued_count(), 2);

    session.on_open();
    assert_eq!(
        transport.methods(),
        vec!["aria2.tellActive", "aria2.pauseAll", "aria2.unpauseAll"]
    );
}

#[test]
fn test_refused_send_withdraws_callback() {
    let (mut session, transport) = open_session(None);
    transport.fail_sends(true);

    let (callback, replies) = recording_callback();
    session.send("getVersion", None, callback);

    assert_eq!(session.pending_count(), 0);
    assert!(replies.lock().is_empty());
}

#[test]
fn test_malformed_frames_are_returned_as_errors() {
    let (mut session, _transport) = open_session(None);

    for frame in ["not json", r#"{"id": "1""#, r#"{"method": 5}"#] {
        let err = session.handle_message(frame).unwrap_err();
        assert!(matches!(err, SessionError::MalformedMessage(_)));
    }
    assert_eq!(session.state(), ConnectionState::Open);
}

#[test]
fn test_unmatched_frames_are_dropped() {
    let (mut session, _transport) = open_session(None);

    let frames = [
        r#"{"id":"unknown","result":"OK"}"#,
        r#"{"id":"unknown","error":{"code":1}}"#,
        r#"{"method":"aria2.onDownloadPause","params":[{"gid":"1"}]}"#,
        r#"{"method":"system.multicall","params":[]}"#,
        r#"{}"#,
        "42",
        "[]",
        "null",
    ];
    for frame in frames {
        assert_eq!(session.handle_message(frame).unwrap(), Route::Dropped);
    }
}

#[test]
fn test_clear_drops_everything() {
    let (mut session, transport) = session(None);
    let (handler, seen) = recording_handler();
    session.on("DownloadStop", handler);
    session.send("tellActive", None, None);

    session.clear();
    session.on_open();

    assert!(transport.frames().is_empty());
    assert_eq!(
        session
            .handle_message(r#"{"method":"aria2.onDownloadStop","params":[]}"#)
            .unwrap(),
        Route::Dropped
    );
    assert!(seen.lock().is_empty());
}
