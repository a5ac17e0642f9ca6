use pinyin::ToPinyin;

/// Sort key for bilingual song titles: the first letter of each character's
/// pinyin reading, concatenated and lowercased. Characters without a pinyin
/// reading (Latin letters, digits, punctuation) pass through lowercased.
///
/// Used only for ordering, never as a display value or equality key.
pub fn pinyin_sort_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch.to_pinyin() {
            Some(syllable) => {
                if let Some(initial) = syllable.plain().chars().next() {
                    key.push(initial);
                }
            }
            None => key.extend(ch.to_lowercase()),
        }
    }
    key
}
