//! 설정 관리 — tracefan.toml 파싱 및 런타임 설정
//!
//! [`TracefanConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`TRACEFAN_REPLAY_PATTERN=...` 형식)
//! 3. 설정 파일 (`tracefan.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), tracefan_core::error::TracefanError> {
//! use tracefan_core::config::TracefanConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = TracefanConfig::load("tracefan.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = TracefanConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, TracefanError};

/// Tracefan 통합 설정
///
/// `tracefan.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracefanConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 리플레이 파이프라인 설정
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl TracefanConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, TracefanError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 존재하면 [`load`](Self::load)하고, 없으면 기본값에
    /// 환경변수 오버라이드만 적용합니다.
    ///
    /// CLI처럼 설정 파일이 선택 사항인 호출자를 위한 진입점입니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, TracefanError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path).await
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, TracefanError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TracefanError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                TracefanError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, TracefanError> {
        toml::from_str(toml_str).map_err(|e| {
            TracefanError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `TRACEFAN_{SECTION}_{FIELD}`
    /// 예: `TRACEFAN_REPLAY_DECIMAL_SEPARATOR=comma`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "TRACEFAN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "TRACEFAN_GENERAL_LOG_FORMAT");

        override_string(&mut self.replay.pattern, "TRACEFAN_REPLAY_PATTERN");
        override_separator(
            &mut self.replay.decimal_separator,
            "TRACEFAN_REPLAY_DECIMAL_SEPARATOR",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.general.validate()?;
        self.replay.validate()?;
        Ok(())
    }
}

/// 일반 설정 (`[general]` 섹션)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 로그 출력 형식 ("pretty" 또는 "json")
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.log_format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("unknown format '{other}', expected 'pretty' or 'json'"),
            }),
        }
    }
}

/// 리플레이 파이프라인 설정 (`[replay]` 섹션)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// 라인 추출 패턴 (정규식, 캡처 그룹 5개)
    ///
    /// 그룹 개수 검증은 등록 시점이 아니라 패턴이 처음 컴파일되는
    /// 세션 시작 시점에 수행됩니다.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// transactionTime 필드의 소수 구분 기호
    #[serde(default)]
    pub decimal_separator: DecimalSeparator,
}

impl ReplayConfig {
    /// 기본 추출 패턴
    ///
    /// `...measurementPoint=<NAME>, parent=<NAME>, transactionTime=<DECIMAL>,
    /// recordingTime=<INTEGER>` 형태의 라인을 인식합니다. DECIMAL은 쉼표와
    /// 마침표를 모두 허용합니다.
    pub const DEFAULT_PATTERN: &'static str = r"(.*)measurementPoint=<([^>]*)>, parent=<([^>]*)>, transactionTime=<(\d*[,.]\d*)>, recordingTime=<(\d*)>";

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "replay.pattern".to_owned(),
                reason: "pattern must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            decimal_separator: DecimalSeparator::default(),
        }
    }
}

/// 소수 구분 기호
///
/// 업스트림 로거가 사용한 로케일에 맞춰 설정합니다. 로그와 다른 기호를
/// 설정하면 소수부가 조용히 잘리며, 파이프라인이 세션당 한 번 경고를
/// 남깁니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    /// 마침표 (`12.500`)
    #[default]
    Period,
    /// 쉼표 (`12,500`)
    Comma,
}

impl DecimalSeparator {
    /// 구분 기호 문자를 반환합니다.
    pub fn as_char(self) -> char {
        match self {
            Self::Period => '.',
            Self::Comma => ',',
        }
    }

    /// 문자열에서 구분 기호를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않으며 기호 문자 자체도 허용합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "period" | "point" | "dot" | "." => Some(Self::Period),
            "comma" | "," => Some(Self::Comma),
            _ => None,
        }
    }
}

impl fmt::Display for DecimalSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Period => write!(f, "period"),
            Self::Comma => write!(f, "comma"),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_log_format() -> String {
    "pretty".to_owned()
}

fn default_pattern() -> String {
    ReplayConfig::DEFAULT_PATTERN.to_owned()
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        *target = value;
    }
}

fn override_separator(target: &mut DecimalSeparator, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        match DecimalSeparator::from_str_loose(&value) {
            Some(separator) => *target = separator,
            None => warn!(
                env = env_key,
                value = %value,
                "ignoring invalid decimal separator override"
            ),
        }
    }
}
