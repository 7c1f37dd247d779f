//! Relevance gate for incoming questions
//!
//! Decides whether a normalized English question belongs to the supported
//! domain (pregnancy, general health, women's health, mental health,
//! fertility, newborn care). Union-of-matches over a fixed pattern table:
//! any hit anywhere in the text passes. There is no scoring.
//!
//! The table deliberately includes generic interrogatives ("what", "how",
//! "why"), so effectively any well-formed question passes. That is a
//! low-precision, high-recall product decision: the gate exists to reject
//! clearly off-topic input before an LLM call is paid for, not to be a
//! topical classifier.

use regex::RegexSet;
use regex::RegexSetBuilder;

/// Domain vocabulary, kept as plain data so it can be tested and extended
/// independently of control flow.
pub const RELEVANT_PATTERNS: &[&str] = &[
    // Pregnancy
    r"pregn.*",
    r"expecting",
    r"conception",
    r"fertility",
    r"miscarriage",
    r"prenatal",
    r"antenatal",
    r"trimester",
    r"due date",
    r"gestation",
    r"maternity",
    r"childbirth",
    r"labor",
    r"delivery",
    r"contractions",
    r"water broke",
    r"amniotic fluid",
    r"fetus",
    r"baby",
    r"embryo",
    r"ultrasound",
    r"obstetrician",
    r"midwife",
    r"lactation",
    r"breastfeeding",
    r"postpartum",
    r"morning sickness",
    r"nausea",
    r"cravings",
    r"weight gain",
    r"prenatal vitamins",
    r"prenatal care",
    r"obstetric",
    r"OB-GYN",
    r"pregnancy symptoms",
    r"pregnancy test",
    // General health
    r"health",
    r"well-being",
    r"wellbeing",
    r"medical",
    r"doctor",
    r"physician",
    r"clinic",
    r"hospital",
    r"diagnosis",
    r"treatment",
    r"medication",
    r"drug",
    r"symptom",
    r"signs",
    r"illness",
    r"disease",
    r"condition",
    r"pain",
    r"ache",
    r"fatigue",
    r"fever",
    r"infection",
    r"virus",
    r"bacteria",
    r"chronic",
    r"acute",
    r"allergy",
    r"asthma",
    r"diabetes",
    r"hypertension",
    r"blood pressure",
    r"heart rate",
    r"cholesterol",
    r"cardiovascular",
    r"cancer",
    r"tumor",
    r"biopsy",
    r"radiation",
    r"chemotherapy",
    r"surgery",
    r"operation",
    r"recovery",
    r"rehabilitation",
    r"therapy",
    // Women's health
    r"menstruation",
    r"period",
    r"menstrual",
    r"cycle",
    r"PMS",
    r"menopause",
    r"hot flashes",
    r"endometriosis",
    r"PCOS",
    r"polycystic ovary",
    r"ovulation",
    r"egg freezing",
    r"IVF",
    r"in vitro fertilization",
    r"fertility treatment",
    r"infertility",
    r"contraception",
    r"birth control",
    r"contraceptive",
    r"morning after pill",
    r"abortion",
    // Mental health
    r"mental health",
    r"depression",
    r"anxiety",
    r"stress",
    r"PTSD",
    r"trauma",
    r"counseling",
    r"psychiatrist",
    r"psychologist",
    r"mood swings",
    r"postpartum depression",
    r"baby blues",
    r"panic attack",
    r"bipolar",
    r"schizophrenia",
    r"cognitive behavioral therapy",
    r"CBT",
    r"mindfulness",
    r"meditation",
    // General health inquiries
    r"what",
    r"how",
    r"when",
    r"why",
    r"who",
    r"can I",
    r"should I",
    r"do I need",
    r"is it safe",
    r"safe to",
    r"risk",
    r"cause",
    r"effect",
    r"side effects",
    r"benefit",
    r"harm",
    r"prevention",
    r"vaccine",
    r"immunization",
    r"immune system",
    r"allergic",
    r"skin rash",
    r"eczema",
    r"psoriasis",
    r"migraine",
    r"headache",
    r"stomach ache",
    r"vomiting",
    r"diarrhea",
    r"constipation",
    r"bloating",
    r"indigestion",
    r"acid reflux",
    r"GERD",
    r"gastrointestinal",
    r"intestine",
    r"colon",
    r"liver",
    r"kidney",
    r"pancreas",
    r"jaundice",
    r"urinary tract",
    r"UTI",
    r"bladder",
    r"urination",
    r"dehydration",
    r"hydration",
    r"flu",
    r"cold",
    r"hay fever",
    r"breathing",
    r"shortness of breath",
    r"oxygen",
    r"inhaler",
    r"respiratory",
    // Family planning and fertility
    r"ovary",
    r"fallopian tube",
    r"womb",
    r"uterus",
    r"sperm",
    r"semen analysis",
    r"surrogacy",
    r"egg donation",
    r"sperm donor",
    r"reproductive health",
    r"gynecologist",
    r"family planning",
    r"planned parenthood",
    // Pregnancy complications
    r"ectopic pregnancy",
    r"high-risk pregnancy",
    r"preeclampsia",
    r"gestational diabetes",
    r"preterm labor",
    r"preterm birth",
    r"low birth weight",
    r"stillbirth",
    r"fetal distress",
    r"placenta previa",
    r"placental abruption",
    r"bleeding",
    r"spotting",
    r"loss",
    r"pregnancy loss",
    r"multiple pregnancies",
    r"twins",
    r"triplets",
    r"quadruplets",
    // Newborn care
    r"newborn",
    r"baby care",
    r"infant",
    r"nursing",
    r"formula feeding",
    r"diapers",
    r"sleep training",
    r"colic",
    r"crying",
    r"soothing",
    r"baby sleep",
    r"infant care",
    r"pediatrician",
    r"baby check-up",
    r"vaccination schedule",
    // Nutrition and body changes
    r"prenatal yoga",
    r"exercise during pregnancy",
    r"healthy diet",
    r"nutrition",
    r"folic acid",
    r"iron supplements",
    r"calcium",
    r"omega-3",
    r"weight gain during pregnancy",
    r"gestational weight",
    r"body changes",
    r"swelling",
    r"edema",
    r"stretch marks",
    r"skin changes",
    r"hair changes",
    r"sleep during pregnancy",
    r"insomnia",
    r"restless legs",
    r"back pain",
    r"pelvic pain",
    r"Braxton Hicks",
    r"false labor",
    r"water breaking",
    r"amniotic sac",
    r"birth plan",
    r"natural birth",
    r"c-section",
    r"caesarean",
    r"epidural",
    r"pain relief during labor",
    // Follow-up question phrases
    r"what about",
    r"tell me more",
    r"can you explain",
    r"how about",
    r"can you clarify",
    r"please explain",
    r"what if",
    r"does that mean",
    r"should I be concerned",
    r"what should I do",
    r"what next",
    r"why is that",
    r"how does that work",
    r"how do I",
    r"can I also",
    r"and then",
    r"anything else",
    r"is there more",
    r"can it be",
    r"is it possible",
    r"could it be",
    r"what are the options",
    r"what happens if",
    r"how will that affect",
    r"will it",
    r"does it mean",
    r"would it",
    r"could this",
    r"can you elaborate",
    r"can that",
    r"is it related",
    r"how do I know",
    r"does that apply",
    r"how can I tell",
    r"what about symptoms",
    r"what should I expect",
    r"what are the chances",
    r"how likely is",
    r"what does that involve",
    r"what could cause",
    r"can it lead to",
    r"should I worry",
    r"will it get better",
    r"how serious is",
    r"is it normal",
    r"can I prevent",
    r"how can I manage",
    r"what are the risks",
    r"what are the benefits",
    r"how can it affect",
    r"what else can I do",
    r"how do I avoid",
    r"how do I reduce",
    r"what does it feel like",
    r"how long does it last",
    r"when should I seek help",
];

/// Keyword-pattern gate applied before any LLM call.
///
/// Pure function of the input text: no side effects, deterministic.
pub struct RelevanceFilter {
    patterns: RegexSet,
}

impl RelevanceFilter {
    /// Compile the pattern table. Called once at startup.
    pub fn new() -> Self {
        Self::with_patterns(RELEVANT_PATTERNS)
    }

    /// Compile a custom pattern table (tests, future per-deployment tables)
    pub fn with_patterns(patterns: &[&str]) -> Self {
        let patterns = RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()
            .expect("relevance pattern table must compile");
        Self { patterns }
    }

    /// True if any pattern matches anywhere in the text.
    ///
    /// Input is assumed to already be English; translation happens before
    /// classification.
    pub fn is_relevant(&self, text: &str) -> bool {
        self.patterns.is_match(text)
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_table_compiles() {
        let _ = RelevanceFilter::new();
    }

    #[test]
    fn test_domain_keywords_match() {
        let filter = RelevanceFilter::new();
        assert!(filter.is_relevant("I think I am pregnant"));
        assert!(filter.is_relevant("my baby keeps crying at night"));
        assert!(filter.is_relevant("advice on breastfeeding please"));
        assert!(filter.is_relevant("signs of preeclampsia"));
        assert!(filter.is_relevant("folic acid dosage"));
    }

    #[test]
    fn test_case_insensitive_anywhere_in_text() {
        let filter = RelevanceFilter::new();
        assert!(filter.is_relevant("PREGNANCY test results"));
        assert!(filter.is_relevant("tell me about GESTATIONAL diabetes"));
        // mid-sentence, mixed case
        assert!(filter.is_relevant("she visited the Midwife yesterday"));
    }

    #[test]
    fn test_substring_match() {
        // "pregn.*" matches inside longer words
        let filter = RelevanceFilter::new();
        assert!(filter.is_relevant("prepregnancy checkup"));
    }

    #[test]
    fn test_generic_interrogatives_pass() {
        // Deliberate high-recall design: bare question words are in the table.
        let filter = RelevanceFilter::new();
        assert!(filter.is_relevant("what is the capital of France"));
        assert!(filter.is_relevant("how do magnets work"));
    }

    #[test]
    fn test_off_topic_statement_is_rejected() {
        let filter = RelevanceFilter::new();
        assert!(!filter.is_relevant("the stock exchange closed early today"));
        assert!(!filter.is_relevant("zebras gallop across the savanna"));
        assert!(!filter.is_relevant(""));
    }

    #[test]
    fn test_deterministic() {
        let filter = RelevanceFilter::new();
        let text = "is it safe to exercise during pregnancy";
        assert_eq!(filter.is_relevant(text), filter.is_relevant(text));
    }
}
