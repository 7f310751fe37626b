#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`pattern`]: 추출 패턴 컴파일 및 그룹 계약 검증
//! - [`decimal`]: 로케일 구분 기호를 따르는 십진 디코더
//! - [`matcher`]: 라인 → 측정 레코드 변환 (매칭/디코딩 2단계)
//! - [`pipeline`]: 세션 오케스트레이션 (목적지 생명주기, 팬아웃, 카운터)
//! - [`destination`]: 내장 목적지 (로그, JSON Lines)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! source -> ReplayPipeline -> LineMatcher -> Measurement -> Destinations
//!              |                 |                             |
//!          line stream    pattern + decoder            registration order
//! ```

pub mod decimal;
pub mod destination;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod pipeline;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{ParseSummary, ReplayPipeline, ReplayPipelineBuilder};

// 에러
pub use error::ReplayError;

// 매처
pub use matcher::{LineMatcher, MatchedLine};

// 패턴
pub use pattern::ExtractionPattern;

// 디코더
pub use decimal::DecimalDecoder;

// 내장 목적지
pub use destination::{JsonLinesDestination, LogDestination};
