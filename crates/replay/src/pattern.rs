//! 추출 패턴 -- 라인을 필드로 분해하는 정규식 래퍼
//!
//! 패턴은 세션당 한 번 컴파일되며, 그룹 개수 검증도 그 시점에
//! 수행됩니다. 그룹과 필드의 대응은 고정된 계약입니다:
//!
//! | 그룹 | 필드 |
//! |------|------|
//! | 1 | 무시되는 접두어 |
//! | 2 | measurementPoint |
//! | 3 | parent |
//! | 4 | transactionTime (로케일 형식의 십진 텍스트) |
//! | 5 | recordingTime (10진 정수 텍스트) |
//!
//! 매칭은 라인 전체에 대해 수행됩니다. 부분 문자열 매칭은 매칭으로
//! 취급하지 않습니다.

use regex::{Captures, Regex};

use crate::error::ReplayError;

/// 추출 패턴이 가져야 하는 캡처 그룹 수
pub const GROUP_COUNT: usize = 5;

/// 무시되는 접두어 그룹 번호
pub const GROUP_PREFIX: usize = 1;
/// measurementPoint 그룹 번호
pub const GROUP_POINT: usize = 2;
/// parent 그룹 번호
pub const GROUP_PARENT: usize = 3;
/// transactionTime 그룹 번호
pub const GROUP_TRANSACTION_TIME: usize = 4;
/// recordingTime 그룹 번호
pub const GROUP_RECORDING_TIME: usize = 5;

/// 컴파일된 추출 패턴
///
/// 전체 라인 매칭을 강제하기 위해 원본 패턴을 비캡처 그룹으로 감싸
/// `^(?:...)$`로 앵커링합니다. 비캡처 그룹이므로 그룹 번호는 원본
/// 패턴 그대로 유지됩니다.
#[derive(Debug)]
pub struct ExtractionPattern {
    regex: Regex,
}

impl ExtractionPattern {
    /// 패턴을 컴파일하고 그룹 개수를 검증합니다.
    ///
    /// 정규식 자체가 유효하지 않거나 캡처 그룹이 정확히 5개가 아니면
    /// 설정 에러를 반환합니다. 둘 다 세션 시작 전에 발생하므로
    /// 목적지는 아직 시작되지 않은 상태입니다.
    pub fn compile(pattern: &str) -> Result<Self, ReplayError> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|e| ReplayError::Pattern {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })?;

        // 그룹 0은 전체 매칭이므로 제외
        let found = regex.captures_len() - 1;
        if found != GROUP_COUNT {
            return Err(ReplayError::GroupCount {
                expected: GROUP_COUNT,
                found,
            });
        }

        Ok(Self { regex })
    }

    /// 라인 전체에 대해 패턴 매칭을 시도합니다.
    ///
    /// 매칭되지 않으면 `None`을 반환하며, 이는 에러가 아니라
    /// 건너뛰는 라인(빈 줄, 헤더, 무관한 로그)입니다.
    pub fn captures<'a>(&self, line: &'a str) -> Option<Captures<'a>> {
        self.regex.captures(line)
    }
}
