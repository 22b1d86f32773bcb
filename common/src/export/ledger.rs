//! カードファイル台帳のExcel生成
//!
//! バインダーごとに1シートを作り、バインダー内通し位置順に
//! 確定レコードを並べる。同一図鑑番号は最新の記録だけ残す。

use crate::album::AlbumLayout;
use crate::dex::Dex;
use crate::types::ScanRecord;
use rust_xlsxwriter::*;
use std::collections::BTreeMap;

/// 同一番号の重複を最新の記録に畳む
///
/// 記録日時（YYYY-MM-DD HH:MM:SS）の文字列比較で新旧を判定し、
/// 同時刻は後に現れたレコードが勝つ。
fn latest_per_no(records: &[ScanRecord]) -> BTreeMap<u32, &ScanRecord> {
    let mut latest: BTreeMap<u32, &ScanRecord> = BTreeMap::new();
    for record in records {
        match latest.get(&record.no) {
            Some(existing) if record.scanned_at < existing.scanned_at => {}
            _ => {
                latest.insert(record.no, record);
            }
        }
    }
    latest
}

/// バインダー番号ごとに分配し、通し位置順に並べる
fn group_by_binder<'a>(
    latest: &BTreeMap<u32, &'a ScanRecord>,
) -> BTreeMap<u32, Vec<&'a ScanRecord>> {
    let mut binders: BTreeMap<u32, Vec<&ScanRecord>> = BTreeMap::new();
    for record in latest.values() {
        binders.entry(record.binder).or_default().push(record);
    }
    for group in binders.values_mut() {
        group.sort_by_key(|r| r.slot_in_binder);
    }
    binders
}

/// 台帳Excelをバッファに生成
///
/// # Arguments
/// * `records` - コレクションの確定レコード
/// * `layout` - アルバムレイアウト（容量表示に使用）
/// * `dex` - 図鑑マスタ（名前の補完と収録率の分母に使用）
pub fn generate_ledger_buffer(
    records: &[ScanRecord],
    layout: &AlbumLayout,
    dex: &Dex,
) -> Result<Vec<u8>, String> {
    if records.is_empty() {
        return Err("台帳に出力するレコードがありません".to_string());
    }

    let latest = latest_per_no(records);
    let binders = group_by_binder(&latest);

    let mut workbook = Workbook::new();

    // フォーマット定義
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14.0)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let number_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 概要シート
    let overview = workbook.add_worksheet();
    overview
        .set_name("概要")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    overview
        .set_column_width(0, 18.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    overview
        .set_column_width(1, 14.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    overview
        .set_column_width(2, 14.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    overview
        .merge_range(0, 0, 0, 2, "カードファイル台帳", &title_format)
        .map_err(|e| format!("セルマージエラー: {}", e))?;

    let rate = latest.len() as f64 / dex.len() as f64 * 100.0;
    let summary_rows = [
        ("収録枚数", format!("{}", latest.len())),
        ("図鑑登録数", format!("{}", dex.len())),
        ("収録率", format!("{:.1}%", rate)),
    ];
    for (i, (label, value)) in summary_rows.iter().enumerate() {
        let row = 2 + i as u32;
        overview
            .write_string_with_format(row, 0, *label, &header_format)
            .map_err(|e| format!("書き込みエラー: {}", e))?;
        overview
            .write_string_with_format(row, 1, value, &value_format)
            .map_err(|e| format!("書き込みエラー: {}", e))?;
    }

    // バインダー別の集計
    overview
        .write_string_with_format(6, 0, "バインダー", &header_format)
        .map_err(|e| format!("書き込みエラー: {}", e))?;
    overview
        .write_string_with_format(6, 1, "収録枚数", &header_format)
        .map_err(|e| format!("書き込みエラー: {}", e))?;
    overview
        .write_string_with_format(6, 2, "容量", &header_format)
        .map_err(|e| format!("書き込みエラー: {}", e))?;
    for (i, (binder_no, group)) in binders.iter().enumerate() {
        let row = 7 + i as u32;
        overview
            .write_number_with_format(row, 0, *binder_no, &number_format)
            .map_err(|e| format!("書き込みエラー: {}", e))?;
        overview
            .write_number_with_format(row, 1, group.len() as u32, &number_format)
            .map_err(|e| format!("書き込みエラー: {}", e))?;
        overview
            .write_number_with_format(row, 2, layout.slots_per_binder(), &number_format)
            .map_err(|e| format!("書き込みエラー: {}", e))?;
    }

    // バインダーごとのシート
    const HEADERS: [&str; 6] = ["No", "名前", "言語", "ページ", "スロット", "記録日時"];
    const COL_WIDTHS: [f64; 6] = [8.0, 24.0, 12.0, 8.0, 10.0, 20.0];

    for (binder_no, group) in &binders {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(format!("バインダー{}", binder_no))
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, width) in COL_WIDTHS.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
        }

        let title = format!(
            "バインダー{}（収録 {} / {}）",
            binder_no,
            group.len(),
            layout.slots_per_binder()
        );
        worksheet
            .merge_range(0, 0, 0, 5, &title, &title_format)
            .map_err(|e| format!("セルマージエラー: {}", e))?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(1, col as u16, *header, &header_format)
                .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
        }

        for (i, record) in group.iter().enumerate() {
            let row = 2 + i as u32;

            // 表示名が空のレコードはマスタから補完
            let display_name = if record.display_name.is_empty() {
                dex.display_name(record.no, record.language)
                    .unwrap_or("-")
                    .to_string()
            } else {
                record.display_name.clone()
            };

            worksheet
                .write_number_with_format(row, 0, record.no, &number_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            worksheet
                .write_string_with_format(row, 1, &display_name, &value_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            worksheet
                .write_string_with_format(row, 2, record.language.label(), &value_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            worksheet
                .write_number_with_format(row, 3, record.page, &number_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            worksheet
                .write_number_with_format(row, 4, record.slot_on_page, &number_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            worksheet
                .write_string_with_format(row, 5, &record.scanned_at, &value_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
