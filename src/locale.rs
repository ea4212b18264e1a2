use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    /// `"en"` / `"zh"` force a pack; anything else (normally `"auto"`) means detect.
    pub fn from_setting(setting: &str) -> Option<Self> {
        match setting.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    /// Picks a pack from a POSIX locale string such as `zh_CN.UTF-8`.
    pub fn from_locale_name(name: &str) -> Self {
        if name.starts_with("zh") || name.starts_with("Chinese") {
            Language::Zh
        } else {
            Language::En
        }
    }

    pub fn detect() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|v| !v.is_empty())
            .map(|v| Self::from_locale_name(&v))
            .unwrap_or(Language::En)
    }
}

/// Every user-facing string. Labels ending in a space or colon are prefixes
/// for a detail printed right after them.
#[derive(Debug)]
pub struct Locale {
    pub input_tips: &'static str,
    pub keyword_required: &'static str,
    pub no_matches: &'static str,
    pub enter_choice: &'static str,
    pub invalid_input: &'static str,
    pub invalid_selection: &'static str,
    pub details_header: &'static str,
    pub no_url: &'static str,
    pub file_not_found: &'static str,
    pub download_url: &'static str,
    pub executable_path: &'static str,
    pub extracted_to: &'static str,
    pub extract_permission: &'static str,
    pub extract_failed: &'static str,
    pub missing_after_extract: &'static str,
    pub execution_failed: &'static str,
    pub open_url_failed: &'static str,
    pub current_version: &'static str,
    pub help: &'static str,
}

pub static EN: Locale = Locale {
    input_tips: "Enter command (enter 'help' to see the help): ",
    keyword_required: "A keyword is required. Usage: find -k <keyword> [-t <category>]",
    no_matches: "No matching items found.",
    enter_choice: "Enter the number to open, or 0 to return: ",
    invalid_input: "Invalid input.",
    invalid_selection: "Invalid selection.",
    details_header: "Details for selected item:",
    no_url: "No URL found for the selected item.",
    file_not_found: "No exe or zip file was found on your hard drive. Please download it yourself from the download address provided.",
    download_url: "downloadUrl: ",
    executable_path: "Executable Path: ",
    extracted_to: "Extracted ZIP file to ",
    extract_permission: "Permission error during extraction: ",
    extract_failed: "Failed to extract ZIP file: ",
    missing_after_extract: "The archive was extracted but the executable was not found: ",
    execution_failed: "Failed to execute the tool: ",
    open_url_failed: "Failed to open the URL: ",
    current_version: "current version: ",
    help: r#"
Welcome to favorites!

Available commands:
1. find - Search for items based on a keyword and optional category.
   Usage: find -k <keyword> [-t <category>]

2. list - List all items, optionally filtered by category.
   Usage: list [-t <category>]

3. help - Show this help message.
   Usage: help

4. v / version - Show the current version.

After a listing, enter the number of an item to open it, or 0 to return
to the command prompt without making a selection.

Categories: github, tools, website

Examples:
- Find items related to 'Python':
  find -k Python

- List all items in the 'website' category:
  list -t website
"#,
};

pub static ZH: Locale = Locale {
    input_tips: "输入命令（输入 help 查看帮助）：",
    keyword_required: "需要关键字。用法：find -k <keyword> [-t <category>]",
    no_matches: "未找到匹配的项目。",
    enter_choice: "输入编号进行打开，或输入 0 返回: ",
    invalid_input: "输入无效。",
    invalid_selection: "选择无效。",
    details_header: "所选项目的详细信息：",
    no_url: "所选项目没有找到 URL。",
    file_not_found: "没有从你的硬盘里找到任何 exe 或者 zip 文件，请根据提供的下载地址自行下载。",
    download_url: "下载地址：",
    executable_path: "可执行文件路径：",
    extracted_to: "ZIP 文件已解压到 ",
    extract_permission: "解压时权限不足：",
    extract_failed: "解压 ZIP 文件失败：",
    missing_after_extract: "压缩包已解压，但未找到可执行文件：",
    execution_failed: "工具执行失败：",
    open_url_failed: "打开 URL 失败：",
    current_version: "当前版本：",
    help: r#"
欢迎使用 favorites！

可用的命令：
1. find - 根据关键字和可选类别搜索项目。
   用法：find -k <keyword> [-t <category>]

2. list - 列出所有项目，可按类别筛选。
   用法：list [-t <category>]

3. help - 显示帮助信息。
   用法：help

4. v / version - 显示当前版本。

列出结果后，输入编号以打开项目，或输入 0 返回命令提示符而不选择任何项目。

类别：github, tools, website

示例：
- 查找与 'Python' 相关的项目：
  find -k Python

- 列出所有属于 'website' 类别的项目：
  list -t website
"#,
};

impl Locale {
    pub fn for_language(language: Language) -> &'static Locale {
        match language {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_names_pick_pack() {
        assert_eq!(Language::from_locale_name("zh_CN.UTF-8"), Language::Zh);
        assert_eq!(Language::from_locale_name("zh_TW"), Language::Zh);
        assert_eq!(Language::from_locale_name("Chinese (Simplified)_China"), Language::Zh);
        assert_eq!(Language::from_locale_name("en_US.UTF-8"), Language::En);
        assert_eq!(Language::from_locale_name("C"), Language::En);
        assert_eq!(Language::from_locale_name(""), Language::En);
    }

    #[test]
    fn settings_override_or_defer() {
        assert_eq!(Language::from_setting("ZH"), Some(Language::Zh));
        assert_eq!(Language::from_setting("en"), Some(Language::En));
        assert_eq!(Language::from_setting("auto"), None);
    }

    #[test]
    fn packs_are_distinct() {
        assert_ne!(Locale::for_language(Language::En).help, Locale::for_language(Language::Zh).help);
    }
}
