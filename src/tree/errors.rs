use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to set Java language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,
}
