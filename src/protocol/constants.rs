//! Protocol constants: media types and header names.

/// Media types recognized by the client.
pub mod media_types {
    /// `application/xml`
    pub const XML: &str = "application/xml";
    /// `application/json`
    pub const JSON: &str = "application/json";
    /// `text/html`
    pub const HTML: &str = "text/html";
    /// `text/plain`
    pub const TEXT: &str = "text/plain";
    /// `application/pdf`
    pub const PDF: &str = "application/pdf";
    /// `application/zip`
    pub const ZIP: &str = "application/zip";
    /// `multipart/form-data`
    pub const FORM: &str = "multipart/form-data";
    /// `application/x-www-form-urlencoded`
    pub const FORM_ENCODED: &str = "application/x-www-form-urlencoded";
    /// `application/octet-stream`, used for file parts
    pub const OCTET_STREAM: &str = "application/octet-stream";
    /// Content type of text form parts
    pub const TEXT_UTF8: &str = "text/plain; charset=utf-8";
    /// Content type of JSON request bodies
    pub const JSON_UTF8: &str = "application/json; charset=utf-8";

    /// Success media types returned as raw bytes.
    pub const BINARY: [&str; 3] = [HTML, PDF, ZIP];
}

/// Header names and fixed values.
pub mod headers {
    /// Authorization scheme sent with every request
    pub const BEARER: &str = "Bearer";
    /// Part name used for every file part
    pub const FILE_PART_NAME: &str = "file";
}

/// Locale sent when the system locale cannot be determined.
pub const DEFAULT_LOCALE: &str = "en-US";
