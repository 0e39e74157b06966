//! Transliteration of origin-script names into the index's Latin alphabet

/// Pure, deterministic mapping from origin-script text to its Latin approximation
pub trait Transliterate {
    fn transliterate(&self, text: &str) -> String;
}

impl<F> Transliterate for F
where
    F: Fn(&str) -> String,
{
    fn transliterate(&self, text: &str) -> String {
        self(text)
    }
}

/// Russian to Latin table used when the dataset's author names were indexed.
/// Characters outside the table pass through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Translify;

impl Transliterate for Translify {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match translify_char(c) {
                Some(latin) => out.push_str(latin),
                None => out.push(c),
            }
        }
        out
    }
}

fn translify_char(c: char) -> Option<&'static str> {
    let latin = match c {
        // typography
        '‘' | '’' => "'",
        '«' | '»' | '“' | '”' => "\"",
        '–' | '—' | '‒' | '−' => "-",
        '…' => "...",
        '№' => "#",
        // upper case
        'Щ' => "Sch",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Ы' => "Yi",
        'Ю' => "Yu",
        'Я' => "Ya",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'З' => "Z",
        'И' => "I",
        'Й' => "J",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "H",
        'Э' => "E",
        'Ъ' => "`",
        'Ь' => "'",
        // lower case
        'щ' => "sch",
        'ё' => "yo",
        'ж' => "zh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'ы' => "yi",
        'ю' => "yu",
        'я' => "ya",
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'э' => "e",
        'ъ' => "`",
        'ь' => "'",
        _ => return None,
    };
    Some(latin)
}
