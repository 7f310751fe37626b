//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 파이프라인과 목적지(destination)가 교환하는 측정값 타입을 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 파싱된 측정 레코드
///
/// 로그 한 줄이 추출 패턴에 완전히 매칭되고 숫자 필드가 모두 디코딩된
/// 경우에만 생성됩니다. 부분적으로 채워진 상태는 존재하지 않으며,
/// 생성 후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// 측정 지점 식별자 (측정된 연산의 이름)
    pub point: String,
    /// 상위 연산 식별자. 루트 측정이면 `None`
    pub parent: Option<String>,
    /// 측정이 기록된 시각 (epoch 밀리초)
    pub recording_time: u64,
    /// 측정된 연산의 소요 시간 (로그와 동일 단위, 관례상 밀리초)
    pub transaction_time: f64,
}

impl Measurement {
    /// 새 측정 레코드를 생성합니다.
    ///
    /// `parent`의 빈 문자열은 루트 센티넬로 간주하여 `None`으로 정규화합니다.
    pub fn new(
        point: impl Into<String>,
        parent: Option<String>,
        recording_time: u64,
        transaction_time: f64,
    ) -> Self {
        let parent = parent.filter(|p| !p.is_empty());
        Self {
            point: point.into(),
            parent,
            recording_time,
            transaction_time,
        }
    }

    /// 루트 측정 여부 (상위 연산이 없는 경우)
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (parent: {}) {}ms @{}",
            self.point,
            self.parent.as_deref().unwrap_or("-"),
            self.transaction_time,
            self.recording_time,
        )
    }
}
