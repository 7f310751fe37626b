//! 목적지 trait — 측정값 소비자 확장 포인트
//!
//! 파이프라인은 구체 저장소 타입이 아닌 [`Destination`] trait에만
//! 의존합니다. 시계열 저장소, 내보내기 파일, 테스트 더블 등 새로운
//! 소비자를 추가하려면 이 trait을 구현합니다.

use async_trait::async_trait;

use crate::error::DestinationError;
use crate::types::Measurement;

/// 측정값 소비자 trait
///
/// 한 번의 파싱 세션은 `start` → (`matches`/`write`)* → `stop` 순서로
/// 목적지를 호출합니다. 등록 순서가 곧 호출 순서입니다.
///
/// `start`/`write` 실패는 파이프라인이 잡지 않고 전파하므로 세션이
/// 중단됩니다. 중단 경로에서는 `stop`이 호출되지 않을 수 있으며,
/// 구현체는 그 상태를 스스로 감당해야 합니다.
#[async_trait]
pub trait Destination: Send + Sync {
    /// 목적지 이름 (로그와 에러 메시지에 사용)
    fn name(&self) -> &str;

    /// 파싱 세션 시작 훅. 첫 라인을 읽기 전에 호출됩니다.
    async fn start(&mut self) -> Result<(), DestinationError>;

    /// 파싱 세션 종료 훅. 스트림이 정상적으로 소진된 뒤에만 호출됩니다.
    async fn stop(&mut self) -> Result<(), DestinationError>;

    /// 이 목적지가 해당 측정값을 원하는지 여부 (라우팅 술어)
    fn matches(&self, measurement: &Measurement) -> bool;

    /// 측정값을 기록합니다. `matches`가 true인 경우에만 호출됩니다.
    async fn write(&mut self, measurement: &Measurement) -> Result<(), DestinationError>;
}
