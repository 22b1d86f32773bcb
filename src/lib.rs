//! CardDex CLI Library
//!
//! バイナリと統合テストで共有されるCLI側モジュール

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod ocr;
pub mod scanner;
