// 🗺️ Country Entity - ISO 3166-1 reference table
//
// Problem solved:
// - Fuzzy matching needs the full list of recognized country names (in ISO order)
// - Continent enrichment needs name → alpha-2 → continent code
// - Common short names ("Russia", "Vietnam") resolve even though they aren't ISO names

use std::collections::HashMap;

// ============================================================================
// REFERENCE DATA
// ============================================================================

/// (ISO short name, alpha-2, continent code), ordered by alpha-3 like the ISO list
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("Aruba", "AW", "NA"),
    ("Afghanistan", "AF", "AS"),
    ("Angola", "AO", "AF"),
    ("Anguilla", "AI", "NA"),
    ("Åland Islands", "AX", "EU"),
    ("Albania", "AL", "EU"),
    ("Andorra", "AD", "EU"),
    ("United Arab Emirates", "AE", "AS"),
    ("Argentina", "AR", "SA"),
    ("Armenia", "AM", "AS"),
    ("American Samoa", "AS", "OC"),
    ("Antarctica", "AQ", "AN"),
    ("French Southern Territories", "TF", "AN"),
    ("Antigua and Barbuda", "AG", "NA"),
    ("Australia", "AU", "OC"),
    ("Austria", "AT", "EU"),
    ("Azerbaijan", "AZ", "AS"),
    ("Burundi", "BI", "AF"),
    ("Belgium", "BE", "EU"),
    ("Benin", "BJ", "AF"),
    ("Bonaire, Sint Eustatius and Saba", "BQ", "NA"),
    ("Burkina Faso", "BF", "AF"),
    ("Bangladesh", "BD", "AS"),
    ("Bulgaria", "BG", "EU"),
    ("Bahrain", "BH", "AS"),
    ("Bahamas", "BS", "NA"),
    ("Bosnia and Herzegovina", "BA", "EU"),
    ("Saint Barthélemy", "BL", "NA"),
    ("Belarus", "BY", "EU"),
    ("Belize", "BZ", "NA"),
    ("Bermuda", "BM", "NA"),
    ("Bolivia, Plurinational State of", "BO", "SA"),
    ("Brazil", "BR", "SA"),
    ("Barbados", "BB", "NA"),
    ("Brunei Darussalam", "BN", "AS"),
    ("Bhutan", "BT", "AS"),
    ("Bouvet Island", "BV", "AN"),
    ("Botswana", "BW", "AF"),
    ("Central African Republic", "CF", "AF"),
    ("Canada", "CA", "NA"),
    ("Cocos (Keeling) Islands", "CC", "AS"),
    ("Switzerland", "CH", "EU"),
    ("Chile", "CL", "SA"),
    ("China", "CN", "AS"),
    ("Côte d'Ivoire", "CI", "AF"),
    ("Cameroon", "CM", "AF"),
    ("Congo, The Democratic Republic of the", "CD", "AF"),
    ("Congo", "CG", "AF"),
    ("Cook Islands", "CK", "OC"),
    ("Colombia", "CO", "SA"),
    ("Comoros", "KM", "AF"),
    ("Cabo Verde", "CV", "AF"),
    ("Costa Rica", "CR", "NA"),
    ("Cuba", "CU", "NA"),
    ("Curaçao", "CW", "NA"),
    ("Christmas Island", "CX", "AS"),
    ("Cayman Islands", "KY", "NA"),
    ("Cyprus", "CY", "AS"),
    ("Czechia", "CZ", "EU"),
    ("Germany", "DE", "EU"),
    ("Djibouti", "DJ", "AF"),
    ("Dominica", "DM", "NA"),
    ("Denmark", "DK", "EU"),
    ("Dominican Republic", "DO", "NA"),
    ("Algeria", "DZ", "AF"),
    ("Ecuador", "EC", "SA"),
    ("Egypt", "EG", "AF"),
    ("Eritrea", "ER", "AF"),
    ("Western Sahara", "EH", "AF"),
    ("Spain", "ES", "EU"),
    ("Estonia", "EE", "EU"),
    ("Ethiopia", "ET", "AF"),
    ("Finland", "FI", "EU"),
    ("Fiji", "FJ", "OC"),
    ("Falkland Islands (Malvinas)", "FK", "SA"),
    ("France", "FR", "EU"),
    ("Faroe Islands", "FO", "EU"),
    ("Micronesia, Federated States of", "FM", "OC"),
    ("Gabon", "GA", "AF"),
    ("United Kingdom", "GB", "EU"),
    ("Georgia", "GE", "AS"),
    ("Guernsey", "GG", "EU"),
    ("Ghana", "GH", "AF"),
    ("Gibraltar", "GI", "EU"),
    ("Guinea", "GN", "AF"),
    ("Guadeloupe", "GP", "NA"),
    ("Gambia", "GM", "AF"),
    ("Guinea-Bissau", "GW", "AF"),
    ("Equatorial Guinea", "GQ", "AF"),
    ("Greece", "GR", "EU"),
    ("Grenada", "GD", "NA"),
    ("Greenland", "GL", "NA"),
    ("Guatemala", "GT", "NA"),
    ("French Guiana", "GF", "SA"),
    ("Guam", "GU", "OC"),
    ("Guyana", "GY", "SA"),
    ("Hong Kong", "HK", "AS"),
    ("Heard Island and McDonald Islands", "HM", "AN"),
    ("Honduras", "HN", "NA"),
    ("Croatia", "HR", "EU"),
    ("Haiti", "HT", "NA"),
    ("Hungary", "HU", "EU"),
    ("Indonesia", "ID", "AS"),
    ("Isle of Man", "IM", "EU"),
    ("India", "IN", "AS"),
    ("British Indian Ocean Territory", "IO", "AS"),
    ("Ireland", "IE", "EU"),
    ("Iran, Islamic Republic of", "IR", "AS"),
    ("Iraq", "IQ", "AS"),
    ("Iceland", "IS", "EU"),
    ("Israel", "IL", "AS"),
    ("Italy", "IT", "EU"),
    ("Jamaica", "JM", "NA"),
    ("Jersey", "JE", "EU"),
    ("Jordan", "JO", "AS"),
    ("Japan", "JP", "AS"),
    ("Kazakhstan", "KZ", "AS"),
    ("Kenya", "KE", "AF"),
    ("Kyrgyzstan", "KG", "AS"),
    ("Cambodia", "KH", "AS"),
    ("Kiribati", "KI", "OC"),
    ("Saint Kitts and Nevis", "KN", "NA"),
    ("Korea, Republic of", "KR", "AS"),
    ("Kuwait", "KW", "AS"),
    ("Lao People's Democratic Republic", "LA", "AS"),
    ("Lebanon", "LB", "AS"),
    ("Liberia", "LR", "AF"),
    ("Libya", "LY", "AF"),
    ("Saint Lucia", "LC", "NA"),
    ("Liechtenstein", "LI", "EU"),
    ("Sri Lanka", "LK", "AS"),
    ("Lesotho", "LS", "AF"),
    ("Lithuania", "LT", "EU"),
    ("Luxembourg", "LU", "EU"),
    ("Latvia", "LV", "EU"),
    ("Macao", "MO", "AS"),
    ("Saint Martin (French part)", "MF", "NA"),
    ("Morocco", "MA", "AF"),
    ("Monaco", "MC", "EU"),
    ("Moldova, Republic of", "MD", "EU"),
    ("Madagascar", "MG", "AF"),
    ("Maldives", "MV", "AS"),
    ("Mexico", "MX", "NA"),
    ("Marshall Islands", "MH", "OC"),
    ("North Macedonia", "MK", "EU"),
    ("Mali", "ML", "AF"),
    ("Malta", "MT", "EU"),
    ("Myanmar", "MM", "AS"),
    ("Montenegro", "ME", "EU"),
    ("Mongolia", "MN", "AS"),
    ("Northern Mariana Islands", "MP", "OC"),
    ("Mozambique", "MZ", "AF"),
    ("Mauritania", "MR", "AF"),
    ("Montserrat", "MS", "NA"),
    ("Martinique", "MQ", "NA"),
    ("Mauritius", "MU", "AF"),
    ("Malawi", "MW", "AF"),
    ("Malaysia", "MY", "AS"),
    ("Mayotte", "YT", "AF"),
    ("Namibia", "NA", "AF"),
    ("New Caledonia", "NC", "OC"),
    ("Niger", "NE", "AF"),
    ("Norfolk Island", "NF", "OC"),
    ("Nigeria", "NG", "AF"),
    ("Nicaragua", "NI", "NA"),
    ("Niue", "NU", "OC"),
    ("Netherlands", "NL", "EU"),
    ("Norway", "NO", "EU"),
    ("Nepal", "NP", "AS"),
    ("Nauru", "NR", "OC"),
    ("New Zealand", "NZ", "OC"),
    ("Oman", "OM", "AS"),
    ("Pakistan", "PK", "AS"),
    ("Panama", "PA", "NA"),
    ("Pitcairn", "PN", "OC"),
    ("Peru", "PE", "SA"),
    ("Philippines", "PH", "AS"),
    ("Palau", "PW", "OC"),
    ("Papua New Guinea", "PG", "OC"),
    ("Poland", "PL", "EU"),
    ("Puerto Rico", "PR", "NA"),
    ("Korea, Democratic People's Republic of", "KP", "AS"),
    ("Portugal", "PT", "EU"),
    ("Paraguay", "PY", "SA"),
    ("Palestine, State of", "PS", "AS"),
    ("French Polynesia", "PF", "OC"),
    ("Qatar", "QA", "AS"),
    ("Réunion", "RE", "AF"),
    ("Romania", "RO", "EU"),
    ("Russian Federation", "RU", "EU"),
    ("Rwanda", "RW", "AF"),
    ("Saudi Arabia", "SA", "AS"),
    ("Sudan", "SD", "AF"),
    ("Senegal", "SN", "AF"),
    ("Singapore", "SG", "AS"),
    ("South Georgia and the South Sandwich Islands", "GS", "AN"),
    ("Saint Helena, Ascension and Tristan da Cunha", "SH", "AF"),
    ("Svalbard and Jan Mayen", "SJ", "EU"),
    ("Solomon Islands", "SB", "OC"),
    ("Sierra Leone", "SL", "AF"),
    ("El Salvador", "SV", "NA"),
    ("San Marino", "SM", "EU"),
    ("Somalia", "SO", "AF"),
    ("Saint Pierre and Miquelon", "PM", "NA"),
    ("Serbia", "RS", "EU"),
    ("South Sudan", "SS", "AF"),
    ("Sao Tome and Principe", "ST", "AF"),
    ("Suriname", "SR", "SA"),
    ("Slovakia", "SK", "EU"),
    ("Slovenia", "SI", "EU"),
    ("Sweden", "SE", "EU"),
    ("Eswatini", "SZ", "AF"),
    ("Sint Maarten (Dutch part)", "SX", "NA"),
    ("Seychelles", "SC", "AF"),
    ("Syrian Arab Republic", "SY", "AS"),
    ("Turks and Caicos Islands", "TC", "NA"),
    ("Chad", "TD", "AF"),
    ("Togo", "TG", "AF"),
    ("Thailand", "TH", "AS"),
    ("Tajikistan", "TJ", "AS"),
    ("Tokelau", "TK", "OC"),
    ("Turkmenistan", "TM", "AS"),
    ("Timor-Leste", "TL", "AS"),
    ("Tonga", "TO", "OC"),
    ("Trinidad and Tobago", "TT", "NA"),
    ("Tunisia", "TN", "AF"),
    ("Türkiye", "TR", "AS"),
    ("Tuvalu", "TV", "OC"),
    ("Taiwan, Province of China", "TW", "AS"),
    ("Tanzania, United Republic of", "TZ", "AF"),
    ("Uganda", "UG", "AF"),
    ("Ukraine", "UA", "EU"),
    ("United States Minor Outlying Islands", "UM", "OC"),
    ("Uruguay", "UY", "SA"),
    ("United States", "US", "NA"),
    ("Uzbekistan", "UZ", "AS"),
    ("Holy See (Vatican City State)", "VA", "EU"),
    ("Saint Vincent and the Grenadines", "VC", "NA"),
    ("Venezuela, Bolivarian Republic of", "VE", "SA"),
    ("Virgin Islands, British", "VG", "NA"),
    ("Virgin Islands, U.S.", "VI", "NA"),
    ("Viet Nam", "VN", "AS"),
    ("Vanuatu", "VU", "OC"),
    ("Wallis and Futuna", "WF", "OC"),
    ("Samoa", "WS", "OC"),
    ("Yemen", "YE", "AS"),
    ("South Africa", "ZA", "AF"),
    ("Zambia", "ZM", "AF"),
    ("Zimbabwe", "ZW", "AF"),
];

/// Common names that aren't ISO short names but still resolve to a code
///
/// Not offered as fuzzy-match targets, only used for code lookup.
const ALIASES: &[(&str, &str)] = &[
    ("Bolivia", "BO"),
    ("Brunei", "BN"),
    ("Burma", "MM"),
    ("Cape Verde", "CV"),
    ("Czech Republic", "CZ"),
    ("Democratic Republic of the Congo", "CD"),
    ("East Timor", "TL"),
    ("Holy See", "VA"),
    ("Iran", "IR"),
    ("Ivory Coast", "CI"),
    ("Korea", "KR"),
    ("Kosovo", "XK"),
    ("Laos", "LA"),
    ("Macau", "MO"),
    ("Macedonia", "MK"),
    ("Micronesia", "FM"),
    ("Moldova", "MD"),
    ("North Korea", "KP"),
    ("Palestine", "PS"),
    ("Republic of the Congo", "CG"),
    ("Russia", "RU"),
    ("Saint Helena", "SH"),
    ("South Korea", "KR"),
    ("Swaziland", "SZ"),
    ("Syria", "SY"),
    ("Taiwan", "TW"),
    ("Tanzania", "TZ"),
    ("Turkey", "TR"),
    ("United States of America", "US"),
    ("Vatican City", "VA"),
    ("Venezuela", "VE"),
    ("Vietnam", "VN"),
];

/// User-assigned codes outside ISO 3166-1 that still have a continent
const EXTRA_CONTINENT_CODES: &[(&str, &str)] = &[("XK", "EU")];

// ============================================================================
// COUNTRY REGISTRY
// ============================================================================

/// Registry of recognized countries with name and code indexes
pub struct CountryRegistry {
    names: Vec<&'static str>,
    alpha2_by_name: HashMap<&'static str, &'static str>,
    continent_by_alpha2: HashMap<&'static str, &'static str>,
}

impl CountryRegistry {
    /// Build the registry from the built-in ISO table
    pub fn with_defaults() -> Self {
        let names: Vec<&'static str> = COUNTRIES.iter().map(|&(name, _, _)| name).collect();

        let mut alpha2_by_name: HashMap<&'static str, &'static str> = COUNTRIES
            .iter()
            .map(|&(name, alpha2, _)| (name, alpha2))
            .collect();
        for &(alias, alpha2) in ALIASES {
            alpha2_by_name.entry(alias).or_insert(alpha2);
        }

        let continent_by_alpha2 = COUNTRIES
            .iter()
            .map(|&(_, alpha2, continent)| (alpha2, continent))
            .chain(EXTRA_CONTINENT_CODES.iter().copied())
            .collect();

        CountryRegistry {
            names,
            alpha2_by_name,
            continent_by_alpha2,
        }
    }

    /// Recognized canonical names, in ISO order (fuzzy-match targets)
    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Exact (case-sensitive) lookup of a canonical name or common alias
    pub fn alpha2_for(&self, name: &str) -> Option<&'static str> {
        self.alpha2_by_name.get(name).copied()
    }

    /// Continent code for an alpha-2 code
    pub fn continent_code_for(&self, alpha2: &str) -> Option<&'static str> {
        self.continent_by_alpha2.get(alpha2).copied()
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }
}

impl Default for CountryRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================
