//! # 단식 세션 모델 정의
//!
//! 사용자의 단식 기록 한 건을 표현하는 구조체와, 저장 직전에 적용되는
//! 단식 시간(duration) 계산 규칙을 정의합니다.
//!
//! ## 단식 시간 규칙
//! 저장할 때 `start_time`과 `end_time`이 모두 있으면
//! `duration = round((end_time - start_time)초 / 3600, 2)` 로 다시 계산해 덮어씁니다.
//! `end_time`이 없으면 `duration`은 이전에 저장된 값을 그대로 유지합니다
//! (지우지도, 다시 계산하지도 않음).

use chrono::{DateTime, Utc};

use crate::db::fasts::FastRepository;
use crate::error::AppError;

/// 메모(note)의 최대 길이 (문자 수 기준)
pub const NOTE_MAX_CHARS: usize = 255;

/// 단식 세션 엔티티: DB의 `fast_sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FastSession {
    /// 세션 고유 식별자 (UUIDv7): 처음 저장될 때 부여되므로 그 전까지는 None
    pub id: Option<String>,
    /// 세션을 소유한 사용자 ID (외래키, 사용자 삭제 시 함께 삭제)
    pub owner: String,
    /// 단식 시작 시각 (필수)
    pub start_time: DateTime<Utc>,
    /// 단식 종료 시각: None이면 아직 진행 중
    pub end_time: Option<DateTime<Utc>>,
    /// 단식 시간 (시간 단위, 소수점 둘째 자리): 서버가 계산하는 값
    pub duration: Option<f64>,
    /// 자유 형식 메모 (최대 255자, 없으면 빈 문자열)
    pub note: String,
}

/// 클라이언트가 보낸 필드 묶음: 생성/수정 요청에서 변경할 후보 값들입니다.
///
/// 필드가 `None`이면 요청에 없었다는 뜻입니다.
/// `end_time`/`duration`의 `Some(None)`은 명시적인 `null`을 의미합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FastFields {
    pub id: Option<String>,
    pub owner: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub duration: Option<Option<f64>>,
    pub note: Option<String>,
}

/// 두 시각 사이의 단식 시간을 시간 단위로 계산해 소수점 둘째 자리로 반올림합니다.
///
/// 반올림은 f64 값 그대로를 기준으로 하고, 정확히 중간이면 짝수 쪽으로 갑니다.
/// (`x * 100`을 거치면 0.015처럼 이진수로 0.01499..인 값이 0.02로 올라가 버림)
/// 종료가 시작보다 이르면 음수가 나옵니다.
pub fn derive_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    let seconds = match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    };
    let hours = seconds / 3600.0;
    format!("{hours:.2}").parse().unwrap_or(hours)
}

impl FastSession {
    /// 아직 저장되지 않은 새 세션을 만듭니다.
    pub fn new(
        owner: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: None,
            owner: owner.into(),
            start_time,
            end_time,
            duration: None,
            note: note.unwrap_or_default(),
        }
    }

    /// 검증된 필드 묶음에서 새 세션을 만듭니다.
    ///
    /// `id`와 `duration`은 서버가 정하는 값이므로 무시합니다.
    pub fn from_fields(owner: impl Into<String>, fields: FastFields) -> Result<Self, AppError> {
        let start_time = fields
            .start_time
            .ok_or_else(|| AppError::validation("start_time", "This field is required."))?;

        Ok(Self::new(
            owner,
            start_time,
            fields.end_time.flatten(),
            fields.note,
        ))
    }

    /// 요청에 포함된 필드만 덮어씁니다 (부분 업데이트).
    ///
    /// `owner`, `id`, `duration`은 여기서 바꾸지 않습니다.
    pub fn apply(&mut self, fields: FastFields) {
        if let Some(start_time) = fields.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = fields.end_time {
            self.end_time = end_time;
        }
        if let Some(note) = fields.note {
            self.note = note;
        }
    }

    /// 단식 시간 규칙을 적용합니다. 종료 시각이 없으면 아무것도 하지 않습니다.
    pub fn refresh_duration(&mut self) {
        if let Some(end_time) = self.end_time {
            self.duration = Some(derive_duration(self.start_time, end_time));
        }
    }

    /// 단식 시간을 다시 계산한 뒤 저장소에 기록합니다.
    ///
    /// 처음 저장하는 세션이면 저장소가 ID를 부여합니다.
    pub async fn persist(mut self, repo: &dyn FastRepository) -> Result<FastSession, AppError> {
        self.refresh_duration();
        repo.save(self).await
    }
}
