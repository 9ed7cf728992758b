//! # 단식 세션 JSON 표현 변환
//!
//! `FastSession` ↔ 평평한 JSON 객체 사이의 양방향 변환을 담당합니다.
//! 노출하는 필드는 아래 여섯 개로 고정되어 있고, 이름을 바꾸거나 빼지 않습니다.
//!
//! ```text
//! { "id", "owner", "start_time", "end_time", "duration", "note" }
//! ```
//!
//! - `to_wire()`: 세션 → JSON 객체 (시각은 RFC 3339, duration은 숫자 또는 null)
//! - `from_wire()`: JSON 객체 → `FastFields` (타입 변환 + 필드별 검증 에러 수집)

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::models::{FastFields, FastSession, NOTE_MAX_CHARS};

/// 필드 이름 → 에러 메시지 목록
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// 표현에 포함되는 필드 목록 (순서 고정)
pub const FIELDS: [&str; 6] = ["id", "owner", "start_time", "end_time", "duration", "note"];

/// 검증 모드
///
/// - `Full`: 생성(POST)과 전체 수정(PUT). 필수 필드(`start_time`)가 있어야 함
/// - `Partial`: 부분 수정(PATCH). 보낸 필드만 검사
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Partial,
}

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const BAD_DATETIME: &str =
    "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";
const BAD_NUMBER: &str = "A valid number is required.";
const BAD_STRING: &str = "Not a valid string.";

// 시간대가 없는 시각에 허용하는 형식. UTC로 해석합니다.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// RFC 3339 문자열, 또는 시간대가 없는 ISO-8601 문자열(UTC로 간주)을 파싱합니다.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// 세션을 JSON 객체로 변환합니다.
pub fn to_wire(session: &FastSession) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("id".into(), Value::from(session.id.clone()));
    map.insert("owner".into(), Value::from(session.owner.clone()));
    map.insert(
        "start_time".into(),
        Value::from(format_timestamp(&session.start_time)),
    );
    map.insert(
        "end_time".into(),
        Value::from(session.end_time.as_ref().map(format_timestamp)),
    );
    map.insert("duration".into(), Value::from(session.duration));
    map.insert("note".into(), Value::from(session.note.clone()));
    map
}

/// JSON 값을 검증하여 `FastFields`로 변환합니다.
///
/// 잘못된 필드가 하나라도 있으면 모든 필드의 에러를 모아 `Err`로 반환합니다.
/// 목록에 없는 키는 무시합니다.
pub fn from_wire(value: &Value, mode: Mode) -> Result<FastFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(obj) = value.as_object() else {
        errors.insert(
            "non_field_errors".into(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(value)
            )],
        );
        return Err(errors);
    };

    let mut fields = FastFields::default();

    // id는 읽기 전용이지만, 왕복 변환을 위해 문자열이면 보존합니다.
    fields.id = obj.get("id").and_then(Value::as_str).map(str::to_string);

    match obj.get("owner") {
        None => {}
        Some(Value::Null) => push(&mut errors, "owner", NOT_NULL),
        Some(Value::String(s)) => fields.owner = Some(s.clone()),
        Some(Value::Number(n)) => fields.owner = Some(n.to_string()),
        Some(_) => push(&mut errors, "owner", BAD_STRING),
    }

    match obj.get("start_time") {
        None if mode == Mode::Full => push(&mut errors, "start_time", REQUIRED),
        None => {}
        Some(Value::Null) => push(&mut errors, "start_time", NOT_NULL),
        Some(raw) => match raw.as_str().and_then(parse_timestamp) {
            Some(ts) => fields.start_time = Some(ts),
            None => push(&mut errors, "start_time", BAD_DATETIME),
        },
    }

    match obj.get("end_time") {
        None => {}
        Some(Value::Null) => fields.end_time = Some(None),
        Some(raw) => match raw.as_str().and_then(parse_timestamp) {
            Some(ts) => fields.end_time = Some(Some(ts)),
            None => push(&mut errors, "end_time", BAD_DATETIME),
        },
    }

    match obj.get("duration") {
        None => {}
        Some(Value::Null) => fields.duration = Some(None),
        Some(Value::Number(n)) => fields.duration = Some(n.as_f64()),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(hours) if hours.is_finite() => fields.duration = Some(Some(hours)),
            _ => push(&mut errors, "duration", BAD_NUMBER),
        },
        Some(_) => push(&mut errors, "duration", BAD_NUMBER),
    }

    match obj.get("note") {
        None => {}
        Some(Value::Null) => push(&mut errors, "note", NOT_NULL),
        Some(Value::String(s)) => {
            if s.chars().count() > NOTE_MAX_CHARS {
                push(
                    &mut errors,
                    "note",
                    &format!("Ensure this field has no more than {NOTE_MAX_CHARS} characters."),
                );
            } else {
                fields.note = Some(s.clone());
            }
        }
        Some(_) => push(&mut errors, "note", BAD_STRING),
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(errors)
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
