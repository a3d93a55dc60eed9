//! CLDR derived symbols and patterns for the supported locales.
//!
//! Lookups fall back from `language-region` to `language`. Languages
//! without data use [`ROOT`], which is English.

use tinystr::{tinystr, TinyAsciiStr};

/// Month names in one context.
#[derive(Debug)]
pub(crate) struct MonthNames {
    pub(crate) wide: [&'static str; 12],
    pub(crate) abbreviated: [&'static str; 12],
}

/// The date-time symbols and patterns of a single locale.
#[derive(Debug)]
pub(crate) struct LocaleData {
    /// Month names in formatting context.
    pub(crate) months: MonthNames,
    /// Month names in stand-alone context, when they differ.
    pub(crate) standalone_months: Option<MonthNames>,
    /// Sunday first.
    pub(crate) weekdays_wide: [&'static str; 7],
    pub(crate) weekdays_abbreviated: [&'static str; 7],
    pub(crate) day_periods: [&'static str; 2],
    pub(crate) eras_abbreviated: [&'static str; 2],
    pub(crate) eras_wide: [&'static str; 2],
    pub(crate) quarters_abbreviated: [&'static str; 4],
    pub(crate) quarters_wide: [&'static str; 4],
    /// Full, long, medium, short.
    pub(crate) date_patterns: [&'static str; 4],
    pub(crate) time_patterns: [&'static str; 4],
    /// `{1}` is the date and `{0}` the time.
    pub(crate) datetime_patterns: [&'static str; 4],
    /// Day offsets from today with their names.
    pub(crate) relative_days: &'static [(i8, &'static str)],
    /// 1 is Sunday.
    pub(crate) first_weekday: u8,
    pub(crate) min_days_in_first_week: u8,
}

struct LocaleEntry {
    language: TinyAsciiStr<3>,
    region: Option<TinyAsciiStr<3>>,
    data: &'static LocaleData,
}

const ENGLISH_MONTHS: MonthNames = MonthNames {
    wide: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    abbreviated: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
};

const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const ENGLISH_RELATIVE_DAYS: &[(i8, &str)] = &[(-1, "yesterday"), (0, "today"), (1, "tomorrow")];

pub(crate) static EN_US: LocaleData = LocaleData {
    months: ENGLISH_MONTHS,
    standalone_months: None,
    weekdays_wide: ENGLISH_WEEKDAYS,
    weekdays_abbreviated: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    day_periods: ["AM", "PM"],
    eras_abbreviated: ["BC", "AD"],
    eras_wide: ["Before Christ", "Anno Domini"],
    quarters_abbreviated: ["Q1", "Q2", "Q3", "Q4"],
    quarters_wide: ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"],
    date_patterns: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
    time_patterns: [
        "h:mm:ss\u{202f}a zzzz",
        "h:mm:ss\u{202f}a z",
        "h:mm:ss\u{202f}a",
        "h:mm\u{202f}a",
    ],
    datetime_patterns: ["{1} 'at' {0}", "{1} 'at' {0}", "{1}, {0}", "{1}, {0}"],
    relative_days: ENGLISH_RELATIVE_DAYS,
    first_weekday: 1,
    min_days_in_first_week: 1,
};

static EN_GB: LocaleData = LocaleData {
    months: ENGLISH_MONTHS,
    standalone_months: None,
    weekdays_wide: ENGLISH_WEEKDAYS,
    weekdays_abbreviated: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    day_periods: ["am", "pm"],
    eras_abbreviated: ["BC", "AD"],
    eras_wide: ["Before Christ", "Anno Domini"],
    quarters_abbreviated: ["Q1", "Q2", "Q3", "Q4"],
    quarters_wide: ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"],
    date_patterns: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
    time_patterns: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
    datetime_patterns: ["{1} 'at' {0}", "{1} 'at' {0}", "{1}, {0}", "{1}, {0}"],
    relative_days: ENGLISH_RELATIVE_DAYS,
    first_weekday: 2,
    min_days_in_first_week: 4,
};

static DE: LocaleData = LocaleData {
    months: MonthNames {
        wide: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
        abbreviated: [
            "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
            "Dez.",
        ],
    },
    standalone_months: Some(MonthNames {
        wide: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
        abbreviated: [
            "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
        ],
    }),
    weekdays_wide: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    weekdays_abbreviated: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    day_periods: ["AM", "PM"],
    eras_abbreviated: ["v. Chr.", "n. Chr."],
    eras_wide: ["v. Chr.", "n. Chr."],
    quarters_abbreviated: ["Q1", "Q2", "Q3", "Q4"],
    quarters_wide: ["1. Quartal", "2. Quartal", "3. Quartal", "4. Quartal"],
    date_patterns: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
    time_patterns: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
    datetime_patterns: ["{1} 'um' {0}", "{1} 'um' {0}", "{1}, {0}", "{1}, {0}"],
    relative_days: &[
        (-2, "vorgestern"),
        (-1, "gestern"),
        (0, "heute"),
        (1, "morgen"),
        (2, "übermorgen"),
    ],
    first_weekday: 2,
    min_days_in_first_week: 4,
};

static FR: LocaleData = LocaleData {
    months: MonthNames {
        wide: [
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ],
        abbreviated: [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ],
    },
    standalone_months: None,
    weekdays_wide: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_abbreviated: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    day_periods: ["AM", "PM"],
    eras_abbreviated: ["av. J.-C.", "ap. J.-C."],
    eras_wide: ["avant Jésus-Christ", "après Jésus-Christ"],
    quarters_abbreviated: ["T1", "T2", "T3", "T4"],
    quarters_wide: [
        "1er trimestre",
        "2e trimestre",
        "3e trimestre",
        "4e trimestre",
    ],
    date_patterns: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
    time_patterns: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
    datetime_patterns: ["{1} 'à' {0}", "{1} 'à' {0}", "{1}, {0}", "{1} {0}"],
    relative_days: &[
        (-2, "avant-hier"),
        (-1, "hier"),
        (0, "aujourd’hui"),
        (1, "demain"),
        (2, "après-demain"),
    ],
    first_weekday: 2,
    min_days_in_first_week: 4,
};

static ES: LocaleData = LocaleData {
    months: MonthNames {
        wide: [
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ],
        abbreviated: [
            "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
        ],
    },
    standalone_months: None,
    weekdays_wide: [
        "domingo",
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
    ],
    weekdays_abbreviated: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    day_periods: ["a.\u{a0}m.", "p.\u{a0}m."],
    eras_abbreviated: ["a. C.", "d. C."],
    eras_wide: ["antes de Cristo", "después de Cristo"],
    quarters_abbreviated: ["T1", "T2", "T3", "T4"],
    quarters_wide: [
        "1.er trimestre",
        "2.º trimestre",
        "3.er trimestre",
        "4.º trimestre",
    ],
    date_patterns: [
        "EEEE, d 'de' MMMM 'de' y",
        "d 'de' MMMM 'de' y",
        "d MMM y",
        "d/M/yy",
    ],
    time_patterns: ["H:mm:ss (zzzz)", "H:mm:ss z", "H:mm:ss", "H:mm"],
    datetime_patterns: ["{1}, {0}", "{1}, {0}", "{1}, {0}", "{1}, {0}"],
    relative_days: &[
        (-2, "anteayer"),
        (-1, "ayer"),
        (0, "hoy"),
        (1, "mañana"),
        (2, "pasado mañana"),
    ],
    first_weekday: 2,
    min_days_in_first_week: 4,
};

static PL: LocaleData = LocaleData {
    months: MonthNames {
        wide: [
            "stycznia",
            "lutego",
            "marca",
            "kwietnia",
            "maja",
            "czerwca",
            "lipca",
            "sierpnia",
            "września",
            "października",
            "listopada",
            "grudnia",
        ],
        abbreviated: [
            "sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru",
        ],
    },
    standalone_months: Some(MonthNames {
        wide: [
            "styczeń",
            "luty",
            "marzec",
            "kwiecień",
            "maj",
            "czerwiec",
            "lipiec",
            "sierpień",
            "wrzesień",
            "październik",
            "listopad",
            "grudzień",
        ],
        abbreviated: [
            "sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru",
        ],
    }),
    weekdays_wide: [
        "niedziela",
        "poniedziałek",
        "wtorek",
        "środa",
        "czwartek",
        "piątek",
        "sobota",
    ],
    weekdays_abbreviated: ["niedz.", "pon.", "wt.", "śr.", "czw.", "pt.", "sob."],
    day_periods: ["AM", "PM"],
    eras_abbreviated: ["p.n.e.", "n.e."],
    eras_wide: ["przed naszą erą", "naszej ery"],
    quarters_abbreviated: ["I kw.", "II kw.", "III kw.", "IV kw."],
    quarters_wide: ["I kwartał", "II kwartał", "III kwartał", "IV kwartał"],
    date_patterns: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "d.MM.y"],
    time_patterns: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
    datetime_patterns: ["{1} 'o' {0}", "{1} 'o' {0}", "{1}, {0}", "{1}, {0}"],
    relative_days: &[
        (-2, "przedwczoraj"),
        (-1, "wczoraj"),
        (0, "dzisiaj"),
        (1, "jutro"),
        (2, "pojutrze"),
    ],
    first_weekday: 2,
    min_days_in_first_week: 4,
};

static IT: LocaleData = LocaleData {
    months: MonthNames {
        wide: [
            "gennaio",
            "febbraio",
            "marzo",
            "aprile",
            "maggio",
            "giugno",
            "luglio",
            "agosto",
            "settembre",
            "ottobre",
            "novembre",
            "dicembre",
        ],
        abbreviated: [
            "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
        ],
    },
    standalone_months: None,
    weekdays_wide: [
        "domenica",
        "lunedì",
        "martedì",
        "mercoledì",
        "giovedì",
        "venerdì",
        "sabato",
    ],
    weekdays_abbreviated: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
    day_periods: ["AM", "PM"],
    eras_abbreviated: ["a.C.", "d.C."],
    eras_wide: ["avanti Cristo", "dopo Cristo"],
    quarters_abbreviated: ["T1", "T2", "T3", "T4"],
    quarters_wide: [
        "1º trimestre",
        "2º trimestre",
        "3º trimestre",
        "4º trimestre",
    ],
    date_patterns: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/yy"],
    time_patterns: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
    datetime_patterns: ["{1} {0}", "{1} {0}", "{1}, {0}", "{1}, {0}"],
    relative_days: &[
        (-2, "l’altro ieri"),
        (-1, "ieri"),
        (0, "oggi"),
        (1, "domani"),
        (2, "dopodomani"),
    ],
    first_weekday: 2,
    min_days_in_first_week: 4,
};

static JA: LocaleData = LocaleData {
    months: MonthNames {
        wide: [
            "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
        ],
        abbreviated: [
            "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
        ],
    },
    standalone_months: None,
    weekdays_wide: [
        "日曜日",
        "月曜日",
        "火曜日",
        "水曜日",
        "木曜日",
        "金曜日",
        "土曜日",
    ],
    weekdays_abbreviated: ["日", "月", "火", "水", "木", "金", "土"],
    day_periods: ["午前", "午後"],
    eras_abbreviated: ["紀元前", "西暦"],
    eras_wide: ["紀元前", "西暦"],
    quarters_abbreviated: ["Q1", "Q2", "Q3", "Q4"],
    quarters_wide: ["第1四半期", "第2四半期", "第3四半期", "第4四半期"],
    date_patterns: ["y年M月d日EEEE", "y年M月d日", "y/MM/dd", "y/MM/dd"],
    time_patterns: ["H時mm分ss秒 zzzz", "H:mm:ss z", "H:mm:ss", "H:mm"],
    datetime_patterns: ["{1} {0}", "{1} {0}", "{1} {0}", "{1} {0}"],
    relative_days: &[
        (-2, "一昨日"),
        (-1, "昨日"),
        (0, "今日"),
        (1, "明日"),
        (2, "明後日"),
    ],
    first_weekday: 1,
    min_days_in_first_week: 1,
};

static LOCALES: &[LocaleEntry] = &[
    LocaleEntry {
        language: tinystr!(3, "en"),
        region: None,
        data: &EN_US,
    },
    LocaleEntry {
        language: tinystr!(3, "en"),
        region: Some(tinystr!(3, "GB")),
        data: &EN_GB,
    },
    LocaleEntry {
        language: tinystr!(3, "en"),
        region: Some(tinystr!(3, "IE")),
        data: &EN_GB,
    },
    LocaleEntry {
        language: tinystr!(3, "de"),
        region: None,
        data: &DE,
    },
    LocaleEntry {
        language: tinystr!(3, "fr"),
        region: None,
        data: &FR,
    },
    LocaleEntry {
        language: tinystr!(3, "es"),
        region: None,
        data: &ES,
    },
    LocaleEntry {
        language: tinystr!(3, "pl"),
        region: None,
        data: &PL,
    },
    LocaleEntry {
        language: tinystr!(3, "it"),
        region: None,
        data: &IT,
    },
    LocaleEntry {
        language: tinystr!(3, "ja"),
        region: None,
        data: &JA,
    },
];

/// Returns the data for `language` and `region`, falling back to the
/// language alone. `None` when the language has no data.
pub(crate) fn lookup(language: &str, region: Option<&str>) -> Option<&'static LocaleData> {
    let find = |region: Option<&str>| {
        LOCALES.iter().find(|entry| {
            entry.language.as_str() == language
                && entry.region.as_ref().map(TinyAsciiStr::as_str) == region
        })
    };
    region
        .and_then(|region| find(Some(region)))
        .or_else(|| find(None))
        .map(|entry| entry.data)
}

/// The data of languages without their own, which is English.
pub(crate) static ROOT: &LocaleData = &EN_US;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chain() {
        let lookup = |language, region| lookup(language, region).unwrap();
        assert_eq!(lookup("en", Some("GB")).date_patterns[3], "dd/MM/y");
        assert_eq!(lookup("en", Some("US")).date_patterns[3], "M/d/yy");
        assert_eq!(lookup("de", Some("AT")).weekdays_wide[0], "Sonntag");
        assert_eq!(lookup("ja", Some("JP")).months.wide[0], "1月");
        assert_eq!(lookup("it", None).weekdays_wide[1], "lunedì");
        assert!(super::lookup("ko", Some("KR")).is_none());
    }
}
