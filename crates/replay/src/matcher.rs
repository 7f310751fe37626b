//! 라인 매처 -- 원시 라인을 측정 레코드로 변환
//!
//! [`LineMatcher`]는 컴파일된 추출 패턴과 십진 디코더를 묶어
//! 두 단계 API를 제공합니다:
//!
//! 1. [`match_line`](LineMatcher::match_line): 전체 라인 매칭.
//!    실패는 에러가 아니라 "레코드 없음"입니다.
//! 2. [`decode`](LineMatcher::decode): 매칭된 라인의 숫자 필드 디코딩.
//!    실패는 라인 단위로 복구 가능한 [`ReplayError::Decode`]입니다.
//!
//! 단계를 나눈 이유는 디코딩 전의 원본 캡처 텍스트가 세션당 1회
//! 수행되는 구분 기호 검사에 필요하기 때문입니다.

use tracefan_core::config::ReplayConfig;
use tracefan_core::types::Measurement;

use crate::decimal::DecimalDecoder;
use crate::error::ReplayError;
use crate::pattern::{
    ExtractionPattern, GROUP_PARENT, GROUP_POINT, GROUP_RECORDING_TIME, GROUP_TRANSACTION_TIME,
};

/// 추출 패턴에 매칭된 라인의 원본 캡처 텍스트
#[derive(Debug)]
pub struct MatchedLine<'a> {
    line: &'a str,
    point: &'a str,
    parent: &'a str,
    raw_transaction_time: &'a str,
    raw_recording_time: &'a str,
}

impl MatchedLine<'_> {
    /// 디코딩 전의 transactionTime 텍스트
    pub fn raw_transaction_time(&self) -> &str {
        self.raw_transaction_time
    }
}

/// 라인 매처
pub struct LineMatcher {
    pattern: ExtractionPattern,
    decoder: DecimalDecoder,
}

impl LineMatcher {
    /// 설정으로부터 매처를 생성합니다.
    ///
    /// 패턴 컴파일(그룹 개수 검증 포함)이 여기에서 일어나므로,
    /// 잘못된 패턴은 세션이 시작되기 전에 설정 에러로 실패합니다.
    pub fn new(config: &ReplayConfig) -> Result<Self, ReplayError> {
        let pattern = ExtractionPattern::compile(&config.pattern)?;
        let decoder = DecimalDecoder::new(config.decimal_separator);
        Ok(Self { pattern, decoder })
    }

    /// 라인 전체 매칭을 시도합니다. 매칭되지 않으면 `None`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<MatchedLine<'a>> {
        let caps = self.pattern.captures(line)?;
        let group = |idx: usize| caps.get(idx).map_or("", |m| m.as_str());
        Some(MatchedLine {
            line,
            point: group(GROUP_POINT),
            parent: group(GROUP_PARENT),
            raw_transaction_time: group(GROUP_TRANSACTION_TIME),
            raw_recording_time: group(GROUP_RECORDING_TIME),
        })
    }

    /// 매칭된 라인의 숫자 필드를 디코딩하여 측정 레코드를 생성합니다.
    ///
    /// transactionTime을 먼저, recordingTime을 그다음에 디코딩하며,
    /// 둘 다 성공해야만 레코드가 만들어집니다.
    pub fn decode(&self, matched: &MatchedLine<'_>) -> Result<Measurement, ReplayError> {
        let transaction_time =
            self.decoder
                .decode(matched.raw_transaction_time)
                .map_err(|reason| ReplayError::Decode {
                    line: matched.line.to_owned(),
                    reason,
                })?;

        let recording_time: u64 =
            matched
                .raw_recording_time
                .parse()
                .map_err(|e| ReplayError::Decode {
                    line: matched.line.to_owned(),
                    reason: format!(
                        "unparseable recording time '{}': {e}",
                        matched.raw_recording_time
                    ),
                })?;

        Ok(Measurement::new(
            matched.point,
            Some(matched.parent.to_owned()),
            recording_time,
            transaction_time,
        ))
    }

    /// 매칭된 라인의 십진 텍스트가 설정된 구분 기호를 포함하는지 확인합니다.
    ///
    /// 포함하지 않으면 디코더 로케일과 로그 로케일이 어긋났을 가능성이
    /// 있습니다 (소수부 유실 위험).
    pub fn separator_present(&self, matched: &MatchedLine<'_>) -> bool {
        matched
            .raw_transaction_time
            .contains(self.decoder.separator())
    }

    /// 디코더가 기대하는 구분 기호 문자
    pub fn separator(&self) -> char {
        self.decoder.separator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracefan_core::config::DecimalSeparator;

    const SAMPLE: &str = "prefix measurementPoint=<checkout>, parent=<root>, transactionTime=<12.500>, recordingTime=<1700000000000>";

    fn default_matcher() -> LineMatcher {
        LineMatcher::new(&ReplayConfig::default()).unwrap()
    }

    fn comma_matcher() -> LineMatcher {
        let config = ReplayConfig {
            decimal_separator: DecimalSeparator::Comma,
            ..ReplayConfig::default()
        };
        LineMatcher::new(&config).unwrap()
    }

    #[test]
    fn match_and_decode_sample_line() {
        let matcher = default_matcher();
        let matched = matcher.match_line(SAMPLE).expect("line should match");
        let measurement = matcher.decode(&matched).unwrap();

        assert_eq!(measurement.point, "checkout");
        assert_eq!(measurement.parent.as_deref(), Some("root"));
        assert_eq!(measurement.recording_time, 1_700_000_000_000);
        assert_eq!(measurement.transaction_time, 12.5);
    }

    #[test]
    fn unmatched_line_produces_no_record() {
        let matcher = default_matcher();
        assert!(matcher.match_line("unrelated noise").is_none());
    }

    #[test]
    fn empty_parent_capture_becomes_root() {
        let matcher = default_matcher();
        let line =
            "measurementPoint=<startup>, parent=<>, transactionTime=<0.100>, recordingTime=<5>";
        let matched = matcher.match_line(line).unwrap();
        let measurement = matcher.decode(&matched).unwrap();
        assert!(measurement.is_root());
    }

    #[test]
    fn overflowing_recording_time_is_decode_error() {
        let matcher = default_matcher();
        let line = "measurementPoint=<a>, parent=<b>, transactionTime=<1.000>, recordingTime=<99999999999999999999999999>";
        let matched = matcher.match_line(line).unwrap();
        let err = matcher.decode(&matched).unwrap_err();
        assert!(matches!(err, ReplayError::Decode { .. }));
    }

    #[test]
    fn empty_recording_time_is_decode_error() {
        let matcher = default_matcher();
        let line = "measurementPoint=<a>, parent=<b>, transactionTime=<1.000>, recordingTime=<>";
        let matched = matcher.match_line(line).unwrap();
        assert!(matcher.decode(&matched).is_err());
    }

    #[test]
    fn comma_decoder_reads_comma_logs() {
        let matcher = comma_matcher();
        let line = "measurementPoint=<a>, parent=<b>, transactionTime=<7,250>, recordingTime=<9>";
        let matched = matcher.match_line(line).unwrap();
        let measurement = matcher.decode(&matched).unwrap();
        assert_eq!(measurement.transaction_time, 7.25);
    }

    #[test]
    fn separator_present_detects_locale_mismatch() {
        let matcher = comma_matcher();
        let line = "measurementPoint=<a>, parent=<b>, transactionTime=<7.250>, recordingTime=<9>";
        let matched = matcher.match_line(line).unwrap();
        assert!(!matcher.separator_present(&matched));

        let ok = "measurementPoint=<a>, parent=<b>, transactionTime=<7,250>, recordingTime=<9>";
        let matched = matcher.match_line(ok).unwrap();
        assert!(matcher.separator_present(&matched));
    }

    #[test]
    fn invalid_pattern_fails_construction() {
        let config = ReplayConfig {
            pattern: "([".to_owned(),
            ..ReplayConfig::default()
        };
        assert!(LineMatcher::new(&config).is_err());
    }
}
