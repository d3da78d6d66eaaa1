/// OT/ICS vocabulary for the cheap pre-filter. Anything that doesn't
/// mention one of these never reaches the classifier, which is what keeps
/// the LLM bill proportional to the OT slice of the CVE feed rather than
/// the whole feed.
const OT_KEYWORDS: &[&str] = &[
    // General terms
    "SCADA", "ICS", "Industrial Control", "HMI", "PLC", "RTU", "DCS",
    "SIS", "Process Control", "Operational Technology",
    // Protocols
    "Modbus", "DNP3", "Profinet", "Profibus", "EtherNet/IP", "BACnet",
    "OPC UA", "IEC 61850", "EtherCAT", "CIP", "MMS",
    // Major vendors
    "Siemens", "Rockwell", "Schneider", "ABB", "Honeywell",
    "Emerson", "Mitsubishi", "Omron", "Yokogawa", "General Electric", "Fanuc",
    // Product lines with a high prior of being OT
    "Simatic", "WinCC", "Tia Portal",
    "Logix", "FactoryTalk", "Rslinx",
    "DeltaV", "Ovation",
    "Triconex", "Foxboro",
    "Centum", "ProSafe",
    "Wonderware", "Citect",
];

/// Case-insensitive substring match against a fixed vocabulary.
/// Pure and deterministic; no I/O.
pub struct KeywordFilter {
    vocabulary: Vec<String>,
}

impl KeywordFilter {
    /// Filter with the built-in OT vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(OT_KEYWORDS.iter().map(|s| s.to_string()))
    }

    /// Filter with a custom vocabulary. Terms are matched case-insensitively.
    pub fn with_vocabulary(terms: impl IntoIterator<Item = String>) -> Self {
        Self {
            vocabulary: terms.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// True if the description mentions any vocabulary term.
    /// Empty input is never relevant.
    pub fn is_potential_ot(&self, description: &str) -> bool {
        if description.is_empty() {
            return false;
        }
        let haystack = description.to_lowercase();
        self.vocabulary.iter().any(|term| haystack.contains(term))
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new()
    }
}
