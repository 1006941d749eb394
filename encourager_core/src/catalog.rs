//! Verse catalogs (the verse store).
//!
//! Each language owns an ordered list of verses. Position in the list is the
//! verse's identity, and the same position is treated as the same logical
//! verse in every language, so the built-in lists share one ordering.

use crate::{Error, Language, Result, Verse};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Read-only access to per-language verse lists
///
/// Unknown or missing languages fall back to the default language silently.
pub trait VerseStore: Send + Sync {
    fn list(&self, language: Language) -> &[Verse];
}

impl<T: VerseStore + ?Sized> VerseStore for &T {
    fn list(&self, language: Language) -> &[Verse] {
        (**self).list(language)
    }
}

impl<T: VerseStore + ?Sized> VerseStore for Arc<T> {
    fn list(&self, language: Language) -> &[Verse] {
        (**self).list(language)
    }
}

/// A set of per-language verse lists
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    verses: HashMap<Language, Vec<Verse>>,
}

/// Cached default catalog - built once and reused across all lookups
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached built-in catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to set one language's list
    pub fn with_language(mut self, language: Language, verses: Vec<Verse>) -> Self {
        self.verses.insert(language, verses);
        self
    }

    /// Load a custom catalog from a JSON file
    ///
    /// The file maps language codes to lists of `{text, reference}` objects.
    /// Unsupported language codes are rejected.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let raw: HashMap<String, Vec<Verse>> = serde_json::from_str(&contents)?;

        let mut catalog = Catalog::new();
        for (code, verses) in raw {
            let language = Language::parse_known(&code).ok_or_else(|| {
                Error::Config(format!("Unsupported language '{}' in catalog {:?}", code, path))
            })?;
            catalog.verses.insert(language, verses);
        }

        tracing::info!(
            "Loaded catalog from {:?} ({} languages)",
            path,
            catalog.verses.len()
        );
        Ok(catalog)
    }

    /// Number of verses served for a language (after fallback)
    pub fn len(&self, language: Language) -> usize {
        self.list(language).len()
    }

    pub fn is_empty(&self, language: Language) -> bool {
        self.len(language) == 0
    }

    /// Validate the catalog and return any problems found
    ///
    /// Cross-language index reuse relies on every language having as many
    /// verses as the default language, in the same order. Only lengths can
    /// be checked here.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let default_len = self
            .verses
            .get(&Language::default())
            .map(Vec::len)
            .unwrap_or(0);

        if default_len == 0 {
            errors.push(format!(
                "Default language '{}' has no verses",
                Language::default()
            ));
        }

        for language in Language::ALL {
            if let Some(verses) = self.verses.get(&language) {
                if verses.len() != default_len {
                    errors.push(format!(
                        "Language '{}' has {} verses, expected {}",
                        language,
                        verses.len(),
                        default_len
                    ));
                }
                for (i, verse) in verses.iter().enumerate() {
                    if verse.text.trim().is_empty() || verse.reference.trim().is_empty() {
                        errors.push(format!(
                            "Language '{}' verse {} has empty text or reference",
                            language, i
                        ));
                    }
                }
            }
        }

        errors
    }
}

impl VerseStore for Catalog {
    fn list(&self, language: Language) -> &[Verse] {
        self.verses
            .get(&language)
            .or_else(|| self.verses.get(&Language::default()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn to_verses(entries: &[(&str, &str)]) -> Vec<Verse> {
    entries
        .iter()
        .map(|(text, reference)| Verse::new(*text, *reference))
        .collect()
}

/// Builds the built-in catalog
///
/// Prefer `get_default_catalog()`, which returns a cached reference.
pub fn build_default_catalog() -> Catalog {
    Catalog::new()
        .with_language(Language::En, to_verses(ENGLISH))
        .with_language(Language::Am, to_verses(AMHARIC))
        .with_language(Language::Fi, to_verses(FINNISH))
}

// ============================================================================
// Built-in verses (all lists share one ordering)
// ============================================================================

const ENGLISH: &[(&str, &str)] = &[
    (
        "\"For I know the plans I have for you,\" declares the LORD, \"plans to prosper you and not to harm you, plans to give you hope and a future.\"",
        "Jeremiah 29:11",
    ),
    (
        "I can do all this through him who gives me strength.",
        "Philippians 4:13",
    ),
    (
        "So do not fear, for I am with you; do not be dismayed, for I am your God. I will strengthen you and help you; I will uphold you with my righteous right hand.",
        "Isaiah 41:10",
    ),
    ("The LORD is my shepherd, I lack nothing.", "Psalm 23:1"),
    (
        "Be strong and courageous. Do not be afraid; do not be discouraged, for the LORD your God will be with you wherever you go.",
        "Joshua 1:9",
    ),
    (
        "Come to me, all you who are weary and burdened, and I will give you rest.",
        "Matthew 11:28",
    ),
    (
        "And we know that in all things God works for the good of those who love him, who have been called according to his purpose.",
        "Romans 8:28",
    ),
    (
        "Trust in the LORD with all your heart and lean not on your own understanding.",
        "Proverbs 3:5",
    ),
    (
        "God is our refuge and strength, an ever-present help in trouble.",
        "Psalm 46:1",
    ),
    (
        "Peace I leave with you; my peace I give you. I do not give to you as the world gives. Do not let your hearts be troubled and do not be afraid.",
        "John 14:27",
    ),
    (
        "Because of the LORD's great love we are not consumed, for his compassions never fail. They are new every morning; great is your faithfulness.",
        "Lamentations 3:22-23",
    ),
    ("The LORD bless you and keep you.", "Numbers 6:24"),
];

const AMHARIC: &[(&str, &str)] = &[
    (
        "ለእናንተ የማስበውን አሳብ እኔ አውቃለሁ፥ ይላል እግዚአብሔር፤ ፍጻሜና ተስፋ እሰጣችሁ ዘንድ የሰላም አሳብ ነው እንጂ የክፉ አይደለም።",
        "ኤርምያስ 29፥11",
    ),
    ("ኃይልን በሚሰጠኝ በክርስቶስ ሁሉን እችላለሁ።", "ፊልጵስዩስ 4፥13"),
    (
        "እኔ ከአንተ ጋር ነኝና አትፍራ፤ እኔ አምላክህ ነኝና አትደንግጥ፤ አበረታሃለሁ፥ እረዳሃለሁ፥ በጽድቄም ቀኝ እጅ ደግፌ እይዝሃለሁ።",
        "ኢሳይያስ 41፥10",
    ),
    ("እግዚአብሔር እረኛዬ ነው፥ የሚያሳጣኝም የለም።", "መዝሙር 23፥1"),
    (
        "በምትሄድበት ሁሉ አምላክህ እግዚአብሔር ከአንተ ጋር ነውና ጠንክር፥ አይዞህ፤ አትፍራ፥ አትደንግጥም።",
        "ኢያሱ 1፥9",
    ),
    (
        "እናንተ ደካሞች ሸክማችሁ የከበደ ሁሉ፥ ወደ እኔ ኑ፥ እኔም አሳርፋችኋለሁ።",
        "ማቴዎስ 11፥28",
    ),
    (
        "እግዚአብሔርንም ለሚወዱ እንደ አሳቡም ለተጠሩት ነገር ሁሉ ለበጎ እንዲደረግ እናውቃለን።",
        "ሮሜ 8፥28",
    ),
    ("በፍጹም ልብህ በእግዚአብሔር ታመን፥ በራስህ ማስተዋል አትደገፍ።", "ምሳሌ 3፥5"),
    (
        "አምላካችን መጠጊያችንና ኃይላችን፥ ባገኘን በታላቅ መከራም ረዳታችን ነው።",
        "መዝሙር 46፥1",
    ),
    (
        "ሰላምን እተውላችኋለሁ፤ ሰላሜን እሰጣችኋለሁ፤ እኔ የምሰጣችሁ ዓለም እንደሚሰጥ አይደለም። ልባችሁ አይታወክ አይፍራም።",
        "ዮሐንስ 14፥27",
    ),
    (
        "ከእግዚአብሔር ምሕረት የተነሣ አላለቅንም፥ ርኅራኄው አያልቅምና። ማለዳ ማለዳ አዲስ ነው፤ ታማኝነትህ ብዙ ነው።",
        "ሰቆቃወ ኤርምያስ 3፥22-23",
    ),
    ("እግዚአብሔር ይባርክህ ይጠብቅህም።", "ዘኍልቍ 6፥24"),
];

const FINNISH: &[(&str, &str)] = &[
    (
        "Minä tiedän omat suunnitelmani, jotka olen teitä varten tehnyt, sanoo Herra. Minun suunnitelmani ovat rauhan eivätkä tuhon suunnitelmia: minä annan teille tulevaisuuden ja toivon.",
        "Jeremia 29:11",
    ),
    (
        "Kaiken minä voin hänen avullaan, joka antaa minulle voimaa.",
        "Filippiläiskirje 4:13",
    ),
    (
        "Älä pelkää, minä olen sinun kanssasi! Älä arkaile, minä olen sinun Jumalasi! Minä vahvistan sinua, minä autan sinua, minä tuen sinua voitokkaalla oikealla kädelläni.",
        "Jesaja 41:10",
    ),
    ("Herra on minun paimeneni, ei minulta mitään puutu.", "Psalmi 23:1"),
    (
        "Ole luja ja rohkea. Älä pelkää äläkä arkaile, sillä minä, Herra, sinun Jumalasi, olen sinun kanssasi, kulkipa tiesi minne tahansa.",
        "Joosua 1:9",
    ),
    (
        "Tulkaa minun luokseni, kaikki te työn ja kuormien uuvuttamat. Minä annan teille levon.",
        "Matteus 11:28",
    ),
    (
        "Me tiedämme, että kaikki koituu niiden parhaaksi, jotka rakastavat Jumalaa, niiden, jotka hän on suunnitelmansa mukaisesti kutsunut.",
        "Roomalaiskirje 8:28",
    ),
    (
        "Turvaa Herraan koko sydämestäsi, älä omaan ymmärrykseesi nojaa.",
        "Sananlaskut 3:5",
    ),
    (
        "Jumala on meidän turvamme ja voimamme, hädän hetkellä hän auttaa meitä.",
        "Psalmi 46:2",
    ),
    (
        "Rauhan minä jätän teille: oman rauhani minä annan teille. En minä anna teille niin kuin maailma antaa. Olkoon sydämenne rauhallinen, älkää pelätkö.",
        "Johannes 14:27",
    ),
    (
        "Herran armoa on se, ettemme ole hukkuneet, hänen laupeutensa ei ole loppunut. Se on joka aamu uusi, suuri on sinun uskollisuutesi.",
        "Valitusvirret 3:22-23",
    ),
    ("Herra siunatkoon sinua ja varjelkoon sinua.", "4. Moos. 6:24"),
];
