//! OCRキャッシュの統合テスト
//!
//! ## 変更履歴
//! - 2026-08-25: 初期作成

use carddex_common::language::LanguageCode;
use carddex_rust::ocr::cache::{compute_cache_key, CacheFile};
use std::fs;
use tempfile::tempdir;

/// 挿入したエントリをキーで引ける
#[test]
fn test_insert_and_get() {
    let mut cache = CacheFile::default();
    assert!(cache.is_empty());

    cache.insert(
        "abc123".to_string(),
        "card1.jpg".to_string(),
        2048,
        "ピカチュウ".to_string(),
    );

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("abc123"), Some("ピカチュウ"));
    assert_eq!(cache.get("unknown"), None);
}

/// 保存したキャッシュを再読み込みできる
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::default();
    cache.insert(
        "key1".to_string(),
        "card1.jpg".to_string(),
        1024,
        "リザードン ほのおポケモン".to_string(),
    );
    cache.save(dir.path()).expect("キャッシュ保存に失敗");

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get("key1"), Some("リザードン ほのおポケモン"));
}

/// キャッシュファイルがなければ空で始まる
#[test]
fn test_load_missing_returns_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// 壊れたJSONは空キャッシュ扱い（エラーにしない）
#[test]
fn test_load_corrupt_file_returns_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(CacheFile::cache_path(dir.path()), "これはJSONではない").expect("書き込みに失敗");

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// バージョン不一致のキャッシュは破棄される
#[test]
fn test_load_version_mismatch_returns_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let stale = r#"{
        "version": 99,
        "entries": {
            "k1": { "file_name": "old.jpg", "file_size": 10, "text": "古いテキスト" }
        }
    }"#;
    fs::write(CacheFile::cache_path(dir.path()), stale).expect("書き込みに失敗");

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// clearはキャッシュファイルを削除し、2回目はfalse
#[test]
fn test_clear() {
    let dir = tempdir().expect("Failed to create temp dir");

    let cache = CacheFile::default();
    cache.save(dir.path()).expect("キャッシュ保存に失敗");
    assert!(CacheFile::cache_path(dir.path()).exists());

    let removed = CacheFile::clear(dir.path()).expect("クリアに失敗");
    assert!(removed);
    assert!(!CacheFile::cache_path(dir.path()).exists());

    let removed_again = CacheFile::clear(dir.path()).expect("クリアに失敗");
    assert!(!removed_again);
}

/// キーは画像内容・言語・コマンドの全てに依存する
#[test]
fn test_compute_cache_key_varies_by_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image_a = dir.path().join("a.jpg");
    let image_b = dir.path().join("b.jpg");
    fs::write(&image_a, b"image-bytes-a").expect("書き込みに失敗");
    fs::write(&image_b, b"image-bytes-b").expect("書き込みに失敗");

    let cmd = "tesseract {image} stdout -l {lang}";
    let base = compute_cache_key(&image_a, LanguageCode::En, cmd).expect("キー計算に失敗");

    let other_lang = compute_cache_key(&image_a, LanguageCode::Ja, cmd).expect("キー計算に失敗");
    let other_cmd =
        compute_cache_key(&image_a, LanguageCode::En, "myocr {image}").expect("キー計算に失敗");
    let other_image = compute_cache_key(&image_b, LanguageCode::En, cmd).expect("キー計算に失敗");

    assert_ne!(base, other_lang, "言語が違えばキーも変わる");
    assert_ne!(base, other_cmd, "コマンドが違えばキーも変わる");
    assert_ne!(base, other_image, "画像が違えばキーも変わる");

    // 同じ入力なら常に同じキー
    let same = compute_cache_key(&image_a, LanguageCode::En, cmd).expect("キー計算に失敗");
    assert_eq!(base, same);
}

/// 画像が読めない場合はキー計算がエラー
#[test]
fn test_compute_cache_key_missing_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("nope.jpg");

    let result = compute_cache_key(&missing, LanguageCode::En, "cmd");
    assert!(result.is_err());
}

/// 画像内容が変われば古いキーのエントリはヒットしない
#[test]
fn test_modified_image_misses_cache() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = dir.path().join("card.jpg");
    fs::write(&image, b"original-bytes").expect("書き込みに失敗");

    let cmd = "tesseract {image} stdout -l {lang}";
    let key_before = compute_cache_key(&image, LanguageCode::Ja, cmd).expect("キー計算に失敗");

    let mut cache = CacheFile::default();
    cache.insert(
        key_before.clone(),
        "card.jpg".to_string(),
        14,
        "ピカチュウ".to_string(),
    );

    // 画像を差し替えるとキーが変わり、キャッシュミスになる
    fs::write(&image, b"replaced-bytes").expect("書き込みに失敗");
    let key_after = compute_cache_key(&image, LanguageCode::Ja, cmd).expect("キー計算に失敗");

    assert_ne!(key_before, key_after);
    assert_eq!(cache.get(&key_after), None);
    assert_eq!(cache.get(&key_before), Some("ピカチュウ"));
}
