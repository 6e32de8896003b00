//! 表单校验规则
//!
//! 修改密码与登录表单在提交前的本地校验，服务端仍会再次校验。

/// 特殊字符集合
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MIN_PASSWORD_LEN: usize = 8;

/// 单条密码规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    UpperCase,
    LowerCase,
    Number,
    SpecialChar,
    MinLength,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::UpperCase,
        PasswordRule::LowerCase,
        PasswordRule::Number,
        PasswordRule::SpecialChar,
        PasswordRule::MinLength,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PasswordRule::UpperCase => "At least one uppercase letter",
            PasswordRule::LowerCase => "At least one lowercase letter",
            PasswordRule::Number => "At least one number",
            PasswordRule::SpecialChar => "At least one special character",
            PasswordRule::MinLength => "At least 8 characters long",
        }
    }
}

/// 各规则的检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordReport {
    pub has_upper_case: bool,
    pub has_lower_case: bool,
    pub has_number: bool,
    pub has_special_char: bool,
    pub has_min_length: bool,
}

impl PasswordReport {
    pub fn passes(&self, rule: PasswordRule) -> bool {
        match rule {
            PasswordRule::UpperCase => self.has_upper_case,
            PasswordRule::LowerCase => self.has_lower_case,
            PasswordRule::Number => self.has_number,
            PasswordRule::SpecialChar => self.has_special_char,
            PasswordRule::MinLength => self.has_min_length,
        }
    }

    pub fn is_valid(&self) -> bool {
        PasswordRule::ALL.iter().all(|r| self.passes(*r))
    }

    /// 未满足的规则，顺序固定
    pub fn failures(&self) -> Vec<PasswordRule> {
        PasswordRule::ALL
            .into_iter()
            .filter(|r| !self.passes(*r))
            .collect()
    }
}

pub struct PasswordPolicy;

impl PasswordPolicy {
    pub fn check(password: &str) -> PasswordReport {
        PasswordReport {
            has_upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower_case: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special_char: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            has_min_length: password.chars().count() >= MIN_PASSWORD_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordChangeError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("New passwords do not match")]
    Mismatch,
    #[error("New password does not meet requirements")]
    Weak(PasswordReport),
}

/// 修改密码表单校验：空字段 -> 两次不一致 -> 强度不足
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), PasswordChangeError> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(PasswordChangeError::MissingFields);
    }
    if new != confirm {
        return Err(PasswordChangeError::Mismatch);
    }
    let report = PasswordPolicy::check(new);
    if !report.is_valid() {
        return Err(PasswordChangeError::Weak(report));
    }
    Ok(())
}

/// 登录表单：两项都必须填写
pub fn validate_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    if email.is_empty() || password.is_empty() {
        return Err("Please fill in all fields");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_passes_every_rule() {
        let report = PasswordPolicy::check("Str0ng!pw");
        assert!(report.is_valid());
        assert!(report.failures().is_empty());
    }

    #[test]
    fn failures_are_reported_in_rule_order() {
        let report = PasswordPolicy::check("abc");
        assert_eq!(
            report.failures(),
            vec![
                PasswordRule::UpperCase,
                PasswordRule::Number,
                PasswordRule::SpecialChar,
                PasswordRule::MinLength,
            ]
        );
    }

    #[test]
    fn special_chars_are_limited_to_the_fixed_set() {
        assert!(!PasswordPolicy::check("Abcdefg1_").has_special_char);
        assert!(!PasswordPolicy::check("Abcdefg1-").has_special_char);
        assert!(PasswordPolicy::check("Abcdefg1\"").has_special_char);
        assert!(PasswordPolicy::check("Abcdefg1|").has_special_char);
    }

    #[test]
    fn length_counts_characters() {
        assert!(PasswordPolicy::check("Ää1!ääää").has_min_length);
        assert!(!PasswordPolicy::check("Aa1!aaa").has_min_length);
    }

    #[test]
    fn change_validation_order() {
        assert_eq!(
            validate_password_change("", "x", "y"),
            Err(PasswordChangeError::MissingFields)
        );
        assert_eq!(
            validate_password_change("old", "Str0ng!pw", "Str0ng!px"),
            Err(PasswordChangeError::Mismatch)
        );
        assert!(matches!(
            validate_password_change("old", "weak", "weak"),
            Err(PasswordChangeError::Weak(_))
        ));
        assert_eq!(validate_password_change("old", "Str0ng!pw", "Str0ng!pw"), Ok(()));
    }

    #[test]
    fn credentials_must_be_filled() {
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("a@b.c", "").is_err());
        assert!(validate_credentials("a@b.c", "pw").is_ok());
    }
}
