//! 리플레이 파이프라인 에러 타입
//!
//! [`ReplayError`]는 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<ReplayError> for TracefanError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use tracefan_core::error::{ConfigError, DestinationError, PipelineError, TracefanError};

/// 리플레이 파이프라인 도메인 에러
///
/// [`Decode`](ReplayError::Decode)만 라인 단위로 복구 가능한 에러이며,
/// 나머지는 모두 세션을 중단시킵니다.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// 추출 패턴 정규식 컴파일 실패
    #[error("invalid extraction pattern '{pattern}': {reason}")]
    Pattern {
        /// 컴파일에 실패한 패턴
        pattern: String,
        /// 실패 사유
        reason: String,
    },

    /// 추출 패턴의 캡처 그룹 개수가 계약과 다름
    #[error("extraction pattern must have {expected} capture groups, found {found}")]
    GroupCount {
        /// 요구되는 그룹 수
        expected: usize,
        /// 실제 그룹 수
        found: usize,
    },

    /// 설정 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 숫자 필드 디코딩 실패 (라인 단위 복구 가능)
    #[error("decode error: {reason} (line: {line})")]
    Decode {
        /// 문제가 된 원본 라인
        line: String,
        /// 실패 사유
        reason: String,
    },

    /// 목적지 시작/쓰기/정지 실패
    #[error(transparent)]
    Destination(#[from] DestinationError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ReplayError> for TracefanError {
    fn from(err: ReplayError) -> Self {
        match err {
            ReplayError::Config(e) => TracefanError::Config(e),
            ReplayError::Destination(e) => TracefanError::Destination(e),
            ReplayError::Io(e) => TracefanError::Io(e),
            other => TracefanError::Pipeline(PipelineError::SessionFailed(other.to_string())),
        }
    }
}
