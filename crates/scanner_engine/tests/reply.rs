use pretty_assertions::assert_eq;
use scanner_engine::{decode_reply, ProductReply, ReplyError};

#[test]
fn nom_field_is_found() {
    assert_eq!(
        decode_reply(br#"{"nom":"Milk 1L"}"#),
        Ok(ProductReply::Found {
            article: "Milk 1L".to_string()
        })
    );
}

#[test]
fn error_field_is_not_found() {
    assert_eq!(
        decode_reply(br#"{"error":"not found"}"#),
        Ok(ProductReply::NotFound {
            reason: "not found".to_string()
        })
    );
}

#[test]
fn nom_wins_when_both_fields_are_present() {
    assert_eq!(
        decode_reply(br#"{"error":"ignored","nom":"Butter"}"#),
        Ok(ProductReply::Found {
            article: "Butter".to_string()
        })
    );
}

#[test]
fn non_string_nom_falls_through_to_error() {
    assert_eq!(
        decode_reply(br#"{"nom":42,"error":"bad code"}"#),
        Ok(ProductReply::NotFound {
            reason: "bad code".to_string()
        })
    );
    assert_eq!(
        decode_reply(br#"{"nom":null}"#),
        Ok(ProductReply::Unrecognized)
    );
}

#[test]
fn other_shapes_are_unrecognized() {
    for body in [
        &br#"{"status":"ok"}"#[..],
        br#"{}"#,
        br#"["nom","Milk"]"#,
        br#""Milk""#,
        b"null",
        b"12",
    ] {
        assert_eq!(
            decode_reply(body),
            Ok(ProductReply::Unrecognized),
            "{}",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn empty_and_malformed_bodies_are_errors() {
    assert_eq!(decode_reply(b""), Err(ReplyError::Empty));
    assert_eq!(decode_reply(b" \n"), Err(ReplyError::Empty));
    assert!(matches!(
        decode_reply(b"<html>oops</html>"),
        Err(ReplyError::Malformed(_))
    ));
    assert!(matches!(
        decode_reply(br#"{"nom": "unterminated"#),
        Err(ReplyError::Malformed(_))
    ));
}
