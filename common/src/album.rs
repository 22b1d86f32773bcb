//! カードファイル配置モジュール
//!
//! 図鑑番号から (バインダー, ページ, スロット) の物理位置を決める
//! 純粋な整数計算。状態もI/Oも持たない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 1ページあたりの既定スロット数（3x3リフィル）
pub const DEFAULT_SLOTS_PER_PAGE: u32 = 9;
/// 1バインダーあたりの既定ページ数
pub const DEFAULT_PAGES_PER_BINDER: u32 = 30;

/// カードファイルの収容レイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlbumLayout {
    slots_per_page: u32,
    pages_per_binder: u32,
}

impl Default for AlbumLayout {
    fn default() -> Self {
        AlbumLayout {
            slots_per_page: DEFAULT_SLOTS_PER_PAGE,
            pages_per_binder: DEFAULT_PAGES_PER_BINDER,
        }
    }
}

impl AlbumLayout {
    /// レイアウトを作る
    ///
    /// スロット数・ページ数の0は設定不備としてエラーで返す。
    pub fn new(slots_per_page: u32, pages_per_binder: u32) -> Result<Self> {
        if slots_per_page == 0 {
            return Err(Error::Layout(
                "slots_per_page は1以上を指定してください".to_string(),
            ));
        }
        if pages_per_binder == 0 {
            return Err(Error::Layout(
                "pages_per_binder は1以上を指定してください".to_string(),
            ));
        }
        Ok(AlbumLayout {
            slots_per_page,
            pages_per_binder,
        })
    }

    pub fn slots_per_page(&self) -> u32 {
        self.slots_per_page
    }

    pub fn pages_per_binder(&self) -> u32 {
        self.pages_per_binder
    }

    /// 1バインダーの収容スロット数
    pub fn slots_per_binder(&self) -> u32 {
        self.slots_per_page * self.pages_per_binder
    }
}

/// 図鑑番号に対応する物理位置（すべて1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub binder: u32,
    pub page: u32,
    pub slot_on_page: u32,
    pub slot_in_binder: u32,
}

/// 図鑑番号から配置先を計算する
///
/// `1 <= no <= max_no` を検証し、範囲外は有効範囲つきのエラーで返す
/// （黙って丸め込まない）。範囲内なら決定的な整数計算のみ。
pub fn locate(no: u32, max_no: u32, layout: &AlbumLayout) -> Result<Placement> {
    if no == 0 || no > max_no {
        return Err(Error::NoOutOfRange { no, max: max_no });
    }

    let slots_per_binder = layout.slots_per_binder();
    let zero_based = no - 1;

    let binder = zero_based / slots_per_binder + 1;
    let pos_in_binder = zero_based % slots_per_binder;
    let page = pos_in_binder / layout.slots_per_page() + 1;
    let slot_on_page = pos_in_binder % layout.slots_per_page() + 1;

    Ok(Placement {
        binder,
        page,
        slot_on_page,
        slot_in_binder: pos_in_binder + 1,
    })
}
