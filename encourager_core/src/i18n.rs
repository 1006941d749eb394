//! Interface strings for each supported language.

use crate::{Language, VersePayload, FALLBACK_INDEX};

/// Interface strings for one language
#[derive(Clone, Copy, Debug)]
pub struct Translations {
    pub amen: &'static str,
    pub god_bless: &'static str,
    pub may_this_word: &'static str,
    pub new_blessing: &'static str,
    pub already_received: &'static str,
    pub next_blessing_at: &'static str,
    pub fallback_verse: &'static str,
    pub fallback_reference: &'static str,
}

impl Translations {
    /// The fixed verse shown when no catalog verse can be fetched
    pub fn fallback(&self) -> VersePayload {
        VersePayload {
            text: self.fallback_verse.to_string(),
            reference: self.fallback_reference.to_string(),
            index: FALLBACK_INDEX,
        }
    }
}

const EN: Translations = Translations {
    amen: "Amen",
    god_bless: "God Bless",
    may_this_word: "May this word stay with you today.",
    new_blessing: "New Blessing",
    already_received: "You have already received your Word for today. May it stay in your heart.",
    next_blessing_at: "Next blessing available at midnight.",
    fallback_verse: "The Lord is good to all; he has compassion on all he has made.",
    fallback_reference: "Psalm 145:9",
};

const AM: Translations = Translations {
    amen: "አሜን",
    god_bless: "እግዚአብሔር ይባርክህ",
    may_this_word: "ይህ ቃል ዛሬ ከአንተ ጋር ይሁን።",
    new_blessing: "አዲስ በረከት",
    already_received: "የዛሬውን ቃል አስቀድመው ተቀብለዋል። በልብዎ ይኑር።",
    next_blessing_at: "ቀጣይ በረከት ከእኩለ ሌሊት በኋላ ይገኛል።",
    fallback_verse: "እግዚአብሔር ለሁሉ ቸር ነው፤ ለፍጥረቱም ሁሉ ይራራል።",
    fallback_reference: "መዝሙር 145፥9",
};

const FI: Translations = Translations {
    amen: "Aamen",
    god_bless: "Jumala siunatkoon",
    may_this_word: "Tämä sana kulkekoon kanssasi tänään.",
    new_blessing: "Uusi siunaus",
    already_received: "Olet jo saanut sanasi tälle päivälle. Säilytä se sydämessäsi.",
    next_blessing_at: "Seuraava siunaus on saatavilla keskiyöllä.",
    fallback_verse: "Herra on hyvä kaikille, hän armahtaa kaikkia luotujaan.",
    fallback_reference: "Psalmi 145:9",
};

/// Interface strings for `language`
pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::En => &EN,
        Language::Am => &AM,
        Language::Fi => &FI,
    }
}
