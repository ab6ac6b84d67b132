use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username must be set");
    }
    // 用户名长度校验：4 <= x <= 15
    if username.len() < 4 || username.len() > 15 {
        return Err("Username length must be between 4 and 15 characters");
    }
    // 用户名格式校验：只能包含字母、数字或下划线
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers or underscores");
    }
    Ok(())
}

pub fn validate_display_name(display_name: &str) -> Result<(), &'static str> {
    // 显示名长度校验：1 <= x <= 10（按字符计）
    let len = display_name.chars().count();
    if len == 0 {
        return Err("Display name must be set");
    }
    if len > 10 {
        return Err("Display name must be at most 10 characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱允许留空（未设置）
    if email.is_empty() {
        return Ok(());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_department_name(name: &str) -> Result<(), &'static str> {
    // 部门名长度校验：1 <= x <= 15（按字符计）
    let len = name.chars().count();
    if len == 0 {
        return Err("Department name must be set");
    }
    if len > 15 {
        return Err("Department name must be at most 15 characters");
    }
    Ok(())
}

pub fn validate_question_text(text: &str) -> Result<(), &'static str> {
    // 题目文本长度校验：1 <= x <= 60（按字符计）
    let len = text.chars().count();
    if len == 0 {
        return Err("Question text must be set");
    }
    if len > 60 {
        return Err("Question text must be at most 60 characters");
    }
    Ok(())
}

/// 名称类字段的写前归一化：去除首尾空白
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// 邮箱归一化：域名部分转为小写
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("taro").is_ok());
        assert!(validate_username("Taro_Yamada_99").is_ok());
        assert!(validate_username("a_b1").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(validate_username("abc").is_err());
        assert!(validate_username("abcd").is_ok());
        assert!(validate_username("abcdefghijklmno").is_ok()); // 15 字符
        assert!(validate_username("abcdefghijklmnop").is_err()); // 16 字符
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("taro-yamada").is_err());
        assert!(validate_username("taro yamada").is_err());
        assert!(validate_username("taro@bank").is_err());
        assert!(validate_username("たろう太郎").is_err());
    }

    #[test]
    fn test_display_name_bounds() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("た").is_ok());
        assert!(validate_display_name("1234567890").is_ok()); // 10 字符
        assert!(validate_display_name("12345678901").is_err()); // 11 字符
        assert!(validate_display_name("あいうえおかきくけこ").is_ok()); // 10 个多字节字符
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("").is_ok()); // 允许留空
        assert!(validate_email("taro@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("taro@").is_err());
    }

    #[test]
    fn test_email_normalization() {
        assert_eq!(normalize_email("Taro@EXAMPLE.Com"), "Taro@example.com");
        assert_eq!(normalize_email("  taro@example.com "), "taro@example.com");
        assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn test_department_name_bounds() {
        assert!(validate_department_name("").is_err());
        assert!(validate_department_name("3年B組").is_ok());
        assert!(validate_department_name("123456789012345").is_ok()); // 15 字符
        assert!(validate_department_name("1234567890123456").is_err()); // 16 字符
    }

    #[test]
    fn test_question_text_bounds() {
        assert!(validate_question_text("").is_err());
        assert!(validate_question_text("こんな学校は嫌だ。どんな学校？").is_ok());
        assert!(validate_question_text(&"あ".repeat(60)).is_ok());
        assert!(validate_question_text(&"あ".repeat(61)).is_err());
    }

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("  taro "), "taro");
    }
}
