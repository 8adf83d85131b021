use crate::{ChatMessage, ClientEvent, ServerEvent, WsError};

use axum::extract::ws::Message;
use serde_json::Value;

#[test]
fn given_send_message_json_when_parsed_then_event_decoded() {
    let event =
        ClientEvent::parse(r#"{"event":"sendMessage","data":{"name":"Bob","message":"hi"}}"#)
            .unwrap();

    assert_eq!(
        event,
        ClientEvent::SendMessage {
            name: "Bob".to_string(),
            message: "hi".to_string(),
        }
    );
    assert_eq!(event.event_type(), "send_message");
}

#[test]
fn given_garbage_when_parsed_then_invalid_message() {
    let result = ClientEvent::parse("not json");

    assert!(matches!(result, Err(WsError::InvalidMessage { .. })));
}

#[test]
fn given_unknown_event_name_when_parsed_then_invalid_message() {
    let result = ClientEvent::parse(r#"{"event":"typing","data":{}}"#);

    assert!(matches!(result, Err(WsError::InvalidMessage { .. })));
}

#[test]
fn given_missing_body_field_when_parsed_then_invalid_message() {
    let result = ClientEvent::parse(r#"{"event":"sendMessage","data":{"name":"Bob"}}"#);

    assert!(result.is_err());
}

#[test]
fn given_chat_message_when_encoded_then_wire_shape_matches() {
    let message = ChatMessage::new(7, "Alice", "hello");

    let json: Value =
        serde_json::from_str(&ServerEvent::Message(&message).to_json().unwrap()).unwrap();

    assert_eq!(json["event"], "message");
    assert_eq!(json["data"]["name"], "Alice");
    assert_eq!(json["data"]["message"], "hello");
    assert_eq!(json["data"]["seq"], 7);
    assert!(json["data"]["sentAt"].is_string());
}

#[test]
fn given_error_event_when_framed_then_text_frame_with_code() {
    let frame = ServerEvent::Error {
        code: "INVALID_MESSAGE",
        message: "bad".to_string(),
    }
    .to_frame()
    .unwrap();

    let Message::Text(text) = frame else {
        panic!("expected text frame");
    };
    let json: Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(json["event"], "error");
    assert_eq!(json["data"]["code"], "INVALID_MESSAGE");
    assert_eq!(json["data"]["message"], "bad");
}
