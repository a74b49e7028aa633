use crate::constants::{BAD_REQUEST_BODY, NOT_FOUND_BODY};
use crate::resolver::Resolution;

/// レスポンスのステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    TemporaryRedirect,
    BadRequest,
    NotFound,
}

impl Status {
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::TemporaryRedirect => 307,
            Self::BadRequest => 400,
            Self::NotFound => 404,
        }
    }
}

/// トランスポート非依存のレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Response {
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            headers: Vec::new(),
            body: NOT_FOUND_BODY.to_string(),
        }
    }

    pub fn bad_request() -> Self {
        Self {
            status: Status::BadRequest,
            headers: Vec::new(),
            body: BAD_REQUEST_BODY.to_string(),
        }
    }

    /// `<base_url>/<encoded key>` へのリダイレクト
    pub fn redirect(base_url: &str, key: &str) -> Self {
        Self {
            status: Status::TemporaryRedirect,
            headers: vec![("location", format!("{base_url}/{}", encode_key(key)))],
            body: String::new(),
        }
    }

    pub fn from_resolution(resolution: &Resolution, base_url: &str) -> Self {
        match resolution {
            Resolution::TooLarge { .. } => Self::bad_request(),
            _ => match resolution.redirect_key() {
                Some(key) => Self::redirect(base_url, key),
                None => Self::not_found(),
            },
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}

/// キーをパスセグメントごとにパーセントエンコードする（`/` は残す）
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/")
}
