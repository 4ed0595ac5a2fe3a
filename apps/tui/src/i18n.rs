//! UI string tables for the two supported interface languages.

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    ZhTw,
}

/// Subject whose selection switches the interface to Traditional Chinese.
pub const CHINESE_SUBJECT: &str = "中國語文";

impl Language {
    /// Language implied by a selected subject.
    pub fn for_subject(subject: &str) -> Self {
        if subject == CHINESE_SUBJECT {
            Self::ZhTw
        } else {
            Self::En
        }
    }
}

/// Fixed interface strings.
pub struct UiText {
    pub title: &'static str,
    pub chapters: &'static str,
    pub back: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub flip: &'static str,
    pub go: &'static str,
    pub jump_to: &'static str,
    pub of: &'static str,
    pub version_log: &'static str,
    pub subject: &'static str,
    pub all_subjects: &'static str,
    pub unspecified: &'static str,
    pub difficulty: &'static str,
    pub quit: &'static str,
}

static EN: UiText = UiText {
    title: "Cardbox",
    chapters: "Chapters",
    back: "Back",
    previous: "Previous",
    next: "Next",
    flip: "Flip",
    go: "Go",
    jump_to: "Jump to ",
    of: "/",
    version_log: "Version Log",
    subject: "Subject",
    all_subjects: "All Subjects",
    unspecified: "Unspecified",
    difficulty: "Lv.",
    quit: "Quit",
};

static ZH_TW: UiText = UiText {
    title: "Cardbox",
    chapters: "章節",
    back: "返回",
    previous: "上一張",
    next: "下一張",
    flip: "翻面",
    go: "前往",
    jump_to: "跳轉至",
    of: "/",
    version_log: "版本日誌",
    subject: "科目",
    all_subjects: "所有科目",
    unspecified: "未分類",
    difficulty: "Lv.",
    quit: "離開",
};

/// Strings for a language.
pub fn text(language: Language) -> &'static UiText {
    match language {
        Language::En => &EN,
        Language::ZhTw => &ZH_TW,
    }
}

/// Subject name as shown to the user; only the "Unspecified" sentinel is
/// translated.
pub fn subject_label<'a>(subject: &'a str, language: Language) -> &'a str {
    if subject == cardbox_core::UNSPECIFIED_SUBJECT {
        text(language).unspecified
    } else {
        subject
    }
}
