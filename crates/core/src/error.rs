//! 에러 타입 — 도메인별 에러 정의

/// Tracefan 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum TracefanError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파이프라인 처리 에러
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// 목적지 에러
    #[error("destination error: {0}")]
    Destination(#[from] DestinationError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파이프라인 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 파이프라인 초기화 실패
    #[error("pipeline init failed: {0}")]
    InitFailed(String),

    /// 파싱 세션 실패
    #[error("parse session failed: {0}")]
    SessionFailed(String),
}

/// 목적지 에러
///
/// [`Destination`](crate::destination::Destination) 구현체가 생명주기
/// 훅과 쓰기 연산에서 반환합니다. 파이프라인은 이 에러를 잡지 않고
/// 세션 중단과 함께 호출자에게 전파합니다.
#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    /// 목적지 시작 실패
    #[error("destination '{name}' failed to start: {reason}")]
    Start { name: String, reason: String },

    /// 측정값 쓰기 실패
    #[error("destination '{name}' write failed: {reason}")]
    Write { name: String, reason: String },

    /// 목적지 정지 실패
    #[error("destination '{name}' failed to stop: {reason}")]
    Stop { name: String, reason: String },
}
