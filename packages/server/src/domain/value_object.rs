//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a username
pub const USERNAME_MAX_LENGTH: usize = 100;

/// Maximum length of an option name
pub const OPTION_NAME_MAX_LENGTH: usize = 200;

/// Number of characters in a room code
pub const ROOM_CODE_LENGTH: usize = 4;

/// Characters a room code is drawn from: upper-case letters without the
/// ambiguous I, L and O, followed by the digits 2-9.
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Lowest score a participant can give an option
pub const MIN_SCORE: u8 = 0;

/// Highest score a participant can give an option
pub const MAX_SCORE: u8 = 10;

/// Username value object.
///
/// Identity resolved by the auth collaborator. Anonymous users get a
/// generated identifier, so this is opaque to the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Arguments
    ///
    /// * `name` - The username string
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.chars().count();
        if len > USERNAME_MAX_LENGTH {
            return Err(ValueObjectError::UsernameTooLong {
                max: USERNAME_MAX_LENGTH,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Create an anonymous Username from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Represents the unique, non-shareable identifier of a room (UUID format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId from a UUID string.
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if the string is empty or not a UUID
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        uuid::Uuid::parse_str(&id).map_err(|_| ValueObjectError::RoomIdInvalidFormat(id.clone()))?;
        Ok(Self(id))
    }

    /// Create a RoomId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-shareable room code, e.g. `K7QM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(pub(super) String);

impl RoomCode {
    /// Create a new RoomCode.
    ///
    /// Input is upper-cased before validation so that users can type codes
    /// in any case.
    pub fn new(code: String) -> Result<Self, ValueObjectError> {
        let normalized = code.trim().to_ascii_uppercase();
        let valid = normalized.len() == ROOM_CODE_LENGTH
            && normalized.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b));
        if !valid {
            return Err(ValueObjectError::RoomCodeInvalidFormat {
                length: ROOM_CODE_LENGTH,
                actual: code,
            });
        }
        Ok(Self(normalized))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A votable option in a room.
///
/// Names are compared case-sensitively; surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionName(String);

impl OptionName {
    /// Create a new OptionName.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::OptionNameEmpty);
        }
        let len = trimmed.chars().count();
        if len > OPTION_NAME_MAX_LENGTH {
            return Err(ValueObjectError::OptionNameTooLong {
                max: OPTION_NAME_MAX_LENGTH,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for OptionName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer score in `MIN_SCORE..=MAX_SCORE` given by one participant to one option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(u8);

impl Score {
    /// Score of an option a participant never touched.
    pub const ZERO: Score = Score(MIN_SCORE);

    /// Create a Score, clamping to the allowed range.
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_SCORE))
    }

    /// Coerce an arbitrary client-supplied number into a Score.
    ///
    /// The fractional part is truncated toward zero, then the value is
    /// clamped into `MIN_SCORE..=MAX_SCORE`.
    pub fn coerce(value: f64) -> Result<Self, ValueObjectError> {
        if !value.is_finite() {
            return Err(ValueObjectError::ScoreNotFinite(value.to_string()));
        }
        let clamped = value
            .trunc()
            .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE));
        Ok(Self(clamped as u8))
    }

    /// Get the inner value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted tally result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultId(String);

impl ResultId {
    /// Create a ResultId from a UUID string.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        uuid::Uuid::parse_str(&id)
            .map_err(|_| ValueObjectError::ResultIdInvalidFormat(id.clone()))?;
        Ok(Self(id))
    }

    /// Create a ResultId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque credential that resolves to a [`Username`].
///
/// Carried in the `token` cookie; it is never derived from the username, so
/// knowing someone's name does not let a caller act as them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Parse a client-supplied token. Only UUIDs are ever issued.
    pub fn new(token: String) -> Result<Self, ValueObjectError> {
        uuid::Uuid::parse_str(&token)
            .map_err(|_| ValueObjectError::SessionTokenInvalidFormat(token.clone()))?;
        Ok(Self(token))
    }

    /// Create a SessionToken from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier of one live socket connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_new_success() {
        // テスト項目: 有効なユーザー名を作成できる
        // given (前提条件):
        let name = "alice".to_string();

        // when (操作):
        let result = Username::new(name);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_new_empty_fails() {
        // テスト項目: 空のユーザー名は作成できない
        // given (前提条件):
        let name = "".to_string();

        // when (操作):
        let result = Username::new(name);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_username_new_too_long_fails() {
        // テスト項目: 101 文字以上のユーザー名は作成できない
        // given (前提条件):
        let name = "a".repeat(101);

        // when (操作):
        let result = Username::new(name);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UsernameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_room_id_rejects_non_uuid() {
        // テスト項目: UUID 形式でない RoomId は作成できない
        // given (前提条件):
        let id = "default".to_string();

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::RoomIdInvalidFormat("default".to_string())
        );
    }

    #[test]
    fn test_room_code_is_normalized_to_upper_case() {
        // テスト項目: 小文字で入力されたルームコードは大文字に正規化される
        // given (前提条件):
        let code = "k7qm".to_string();

        // when (操作):
        let result = RoomCode::new(code);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "K7QM");
    }

    #[test]
    fn test_room_code_rejects_ambiguous_glyphs() {
        // テスト項目: 紛らわしい文字 (O, 0, I, 1, L) を含むコードは拒否される
        // given (前提条件):
        let codes = ["AB0C", "OABC", "I234", "AB1C", "LLLL"];

        for code in codes {
            // when (操作):
            let result = RoomCode::new(code.to_string());

            // then (期待する結果):
            assert!(result.is_err(), "code {code} should be rejected");
        }
    }

    #[test]
    fn test_room_code_rejects_wrong_length() {
        // テスト項目: 4 文字以外のコードは拒否される
        // given (前提条件):
        let code = "ABCDE".to_string();

        // when (操作):
        let result = RoomCode::new(code);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ValueObjectError::RoomCodeInvalidFormat { length: 4, .. })
        ));
    }

    #[test]
    fn test_option_name_is_trimmed_and_case_sensitive() {
        // テスト項目: 選択肢名は前後の空白が除去され、大文字小文字は区別される
        // given (前提条件):
        let upper = OptionName::new("  Pizza ".to_string()).unwrap();
        let lower = OptionName::new("pizza".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(upper.as_str(), "Pizza");
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_option_name_whitespace_only_fails() {
        // テスト項目: 空白のみの選択肢名は作成できない
        // when (操作):
        let result = OptionName::new("   ".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::OptionNameEmpty);
    }

    #[test]
    fn test_score_coerce_truncates_fraction() {
        // テスト項目: 小数のスコアは 0 方向に切り捨てられる
        // when (操作):
        let score = Score::coerce(7.9).unwrap();

        // then (期待する結果):
        assert_eq!(score.value(), 7);
    }

    #[test]
    fn test_score_coerce_clamps_out_of_range() {
        // テスト項目: 範囲外のスコアは 0..=10 に丸められる
        // when (操作):
        let high = Score::coerce(42.0).unwrap();
        let low = Score::coerce(-3.5).unwrap();

        // then (期待する結果):
        assert_eq!(high.value(), 10);
        assert_eq!(low.value(), 0);
    }

    #[test]
    fn test_score_coerce_rejects_non_finite() {
        // テスト項目: 有限でない数値はスコアにできない
        // when (操作):
        let result = Score::coerce(f64::NAN);

        // then (期待する結果):
        assert!(matches!(result, Err(ValueObjectError::ScoreNotFinite(_))));
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
    }
}
