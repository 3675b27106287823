use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone)]
pub enum TimeReportError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    /// 携带的是报告 id，而不是完整消息
    NotFound(String),
    Unauthorized(String),
    Serialization(String),
    PasswordHash(String),
    Config(String),
    Statistics(String),
}

impl TimeReportError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TimeReportError::DatabaseConfig(_) => "E001",
            TimeReportError::DatabaseConnection(_) => "E002",
            TimeReportError::DatabaseOperation(_) => "E003",
            TimeReportError::FileOperation(_) => "E004",
            TimeReportError::Validation(_) => "E005",
            TimeReportError::NotFound(_) => "E006",
            TimeReportError::Unauthorized(_) => "E007",
            TimeReportError::Serialization(_) => "E008",
            TimeReportError::PasswordHash(_) => "E009",
            TimeReportError::Config(_) => "E010",
            TimeReportError::Statistics(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TimeReportError::DatabaseConfig(_) => "Database Configuration Error",
            TimeReportError::DatabaseConnection(_) => "Database Connection Error",
            TimeReportError::DatabaseOperation(_) => "Database Operation Error",
            TimeReportError::FileOperation(_) => "File Operation Error",
            TimeReportError::Validation(_) => "Validation Error",
            TimeReportError::NotFound(_) => "Resource Not Found",
            TimeReportError::Unauthorized(_) => "Unauthorized",
            TimeReportError::Serialization(_) => "Serialization Error",
            TimeReportError::PasswordHash(_) => "Password Hash Error",
            TimeReportError::Config(_) => "Configuration Error",
            TimeReportError::Statistics(_) => "Statistics Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            TimeReportError::NotFound(id) => format!("Report {} not found", id),
            TimeReportError::DatabaseConfig(msg)
            | TimeReportError::DatabaseConnection(msg)
            | TimeReportError::DatabaseOperation(msg)
            | TimeReportError::FileOperation(msg)
            | TimeReportError::Validation(msg)
            | TimeReportError::Unauthorized(msg)
            | TimeReportError::Serialization(msg)
            | TimeReportError::PasswordHash(msg)
            | TimeReportError::Config(msg)
            | TimeReportError::Statistics(msg) => msg.clone(),
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            TimeReportError::NotFound(_) => StatusCode::NOT_FOUND,
            TimeReportError::Validation(_) => StatusCode::BAD_REQUEST,
            TimeReportError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TimeReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TimeReportError {}

impl ResponseError for TimeReportError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        // 5xx 不向客户端暴露内部细节
        let body = if self.http_status().is_server_error() {
            self.error_type().to_string()
        } else {
            self.message()
        };

        HttpResponse::build(self.http_status())
            .insert_header(ContentType::plaintext())
            .body(body)
    }
}

// 便捷的构造函数
impl TimeReportError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TimeReportError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TimeReportError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TimeReportError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TimeReportError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TimeReportError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(id: T) -> Self {
        TimeReportError::NotFound(id.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        TimeReportError::Unauthorized(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TimeReportError::Serialization(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        TimeReportError::PasswordHash(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TimeReportError::Config(msg.into())
    }

    pub fn statistics<T: Into<String>>(msg: T) -> Self {
        TimeReportError::Statistics(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TimeReportError {
    fn from(err: sea_orm::DbErr) -> Self {
        TimeReportError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TimeReportError {
    fn from(err: std::io::Error) -> Self {
        TimeReportError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TimeReportError {
    fn from(err: serde_json::Error) -> Self {
        TimeReportError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TimeReportError {
    fn from(err: config::ConfigError) -> Self {
        TimeReportError::Config(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for TimeReportError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        TimeReportError::PasswordHash(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimeReportError>;
