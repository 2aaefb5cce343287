//! Curated alias table: colloquial, historical and official-name variants.
//!
//! Keys are written the way people type them; they are normalized once when
//! the lookup table is built, so "Korea (South)" and "korea south" are the
//! same entry. Every code here must exist in the gazetteer.

pub const ALIAS_ENTRIES: &[(&str, &str)] = &[
    // United States
    ("USA", "US"),
    ("U.S.A.", "US"),
    ("US", "US"),
    ("U.S.", "US"),
    ("United States", "US"),
    ("America", "US"),
    ("The States", "US"),
    // United Kingdom
    ("UK", "GB"),
    ("U.K.", "GB"),
    ("Great Britain", "GB"),
    ("Britain", "GB"),
    ("England", "GB"),
    ("Scotland", "GB"),
    ("Wales", "GB"),
    ("Northern Ireland", "GB"),
    ("United Kingdom of Great Britain and Northern Ireland", "GB"),
    // Middle East
    ("UAE", "AE"),
    ("U.A.E.", "AE"),
    ("Emirates", "AE"),
    ("Iran (Islamic Republic of)", "IR"),
    ("Islamic Republic of Iran", "IR"),
    ("Persia", "IR"),
    ("Syrian Arab Republic", "SY"),
    ("Palestinian Territories", "PS"),
    ("State of Palestine", "PS"),
    ("West Bank", "PS"),
    ("Gaza", "PS"),
    ("KSA", "SA"),
    ("Kingdom of Saudi Arabia", "SA"),
    ("Türkiye", "TR"),
    ("Turkiye", "TR"),
    ("Republic of Turkey", "TR"),
    // Koreas and East Asia
    ("Korea (South)", "KR"),
    ("Korea (Republic of)", "KR"),
    ("Republic of Korea", "KR"),
    ("ROK", "KR"),
    ("Korea", "KR"),
    ("Korea (North)", "KP"),
    ("Korea (Democratic People's Republic of)", "KP"),
    ("Democratic People's Republic of Korea", "KP"),
    ("DPRK", "KP"),
    ("People's Republic of China", "CN"),
    ("PRC", "CN"),
    ("Mainland China", "CN"),
    ("Republic of China", "TW"),
    ("Chinese Taipei", "TW"),
    ("Formosa", "TW"),
    ("Nippon", "JP"),
    ("Nihon", "JP"),
    ("Hong Kong SAR", "HK"),
    // Former Soviet space
    ("Russian Federation", "RU"),
    ("USSR", "RU"),
    ("Soviet Union", "RU"),
    ("Byelorussia", "BY"),
    ("Belorussia", "BY"),
    ("Kirghizia", "KG"),
    ("Kyrgyz Republic", "KG"),
    ("Moldavia", "MD"),
    ("Republic of Moldova", "MD"),
    ("Turkmenia", "TM"),
    ("The Ukraine", "UA"),
    // Central Europe
    ("Czech Republic", "CZ"),
    ("Czech", "CZ"),
    ("Bohemia", "CZ"),
    ("Slovak Republic", "SK"),
    ("Macedonia", "MK"),
    ("FYROM", "MK"),
    ("Former Yugoslav Republic of Macedonia", "MK"),
    ("Republic of North Macedonia", "MK"),
    ("Bosnia", "BA"),
    ("Bosnia-Herzegovina", "BA"),
    ("Herzegovina", "BA"),
    ("Holland", "NL"),
    ("The Netherlands", "NL"),
    ("Deutschland", "DE"),
    ("Federal Republic of Germany", "DE"),
    ("Österreich", "AT"),
    ("Osterreich", "AT"),
    ("Swiss Confederation", "CH"),
    ("Helvetia", "CH"),
    ("Eire", "IE"),
    ("Éire", "IE"),
    ("Republic of Ireland", "IE"),
    ("España", "ES"),
    ("Espana", "ES"),
    ("Hellas", "GR"),
    ("Hellenic Republic", "GR"),
    ("Vatican", "VA"),
    ("Holy See", "VA"),
    ("Holy See (Vatican City State)", "VA"),
    ("Vatican City State", "VA"),
    ("Republic of Kosovo", "XK"),
    // Southeast Asia and Pacific
    ("Viet Nam", "VN"),
    ("Socialist Republic of Vietnam", "VN"),
    ("Lao People's Democratic Republic", "LA"),
    ("Lao PDR", "LA"),
    ("Lao", "LA"),
    ("Brunei Darussalam", "BN"),
    ("Burma", "MM"),
    ("Kampuchea", "KH"),
    ("Siam", "TH"),
    ("East Timor", "TL"),
    ("Timor Leste", "TL"),
    ("Federated States of Micronesia", "FM"),
    ("Micronesia (Federated States of)", "FM"),
    ("PNG", "PG"),
    ("Aotearoa", "NZ"),
    ("Western Samoa", "WS"),
    ("Ceylon", "LK"),
    ("Aus", "AU"),
    ("Oz", "AU"),
    // Africa
    ("Democratic Republic of Congo", "CD"),
    ("DR Congo", "CD"),
    ("DRC", "CD"),
    ("Congo-Kinshasa", "CD"),
    ("Congo (Kinshasa)", "CD"),
    ("Zaire", "CD"),
    ("Congo", "CG"),
    ("Congo-Brazzaville", "CG"),
    ("Congo (Brazzaville)", "CG"),
    ("Congo Republic", "CG"),
    ("Ivory Coast", "CI"),
    ("Cote d'Ivoire", "CI"),
    ("Cote d Ivoire", "CI"),
    ("Cote divoire", "CI"),
    ("Tanzania (United Republic of)", "TZ"),
    ("United Republic of Tanzania", "TZ"),
    ("Swaziland", "SZ"),
    ("Kingdom of Eswatini", "SZ"),
    ("Cape Verde", "CV"),
    ("The Gambia", "GM"),
    ("Gambia, The", "GM"),
    ("Guinea Bissau", "GW"),
    ("Sao Tome and Principe", "ST"),
    ("Sao Tome", "ST"),
    ("São Tomé", "ST"),
    ("Upper Volta", "BF"),
    ("Dahomey", "BJ"),
    ("Rhodesia", "ZW"),
    ("Southern Rhodesia", "ZW"),
    ("Northern Rhodesia", "ZM"),
    ("Nyasaland", "MW"),
    ("Abyssinia", "ET"),
    ("Basutoland", "LS"),
    ("Bechuanaland", "BW"),
    ("South West Africa", "NA"),
    ("Malagasy Republic", "MG"),
    ("Sahrawi Republic", "EH"),
    ("CAR", "CF"),
    ("RSA", "ZA"),
    ("Republic of South Africa", "ZA"),
    ("Libyan Arab Jamahiriya", "LY"),
    ("Egypt, Arab Republic of", "EG"),
    ("Arab Republic of Egypt", "EG"),
    ("Somaliland", "SO"),
    // Americas
    ("Bolivia (Plurinational State of)", "BO"),
    ("Plurinational State of Bolivia", "BO"),
    ("Venezuela (Bolivarian Republic of)", "VE"),
    ("Bolivarian Republic of Venezuela", "VE"),
    ("Brasil", "BR"),
    ("México", "MX"),
    ("United Mexican States", "MX"),
    ("Trinidad", "TT"),
    ("Tobago", "TT"),
    ("Antigua", "AG"),
    ("Barbuda", "AG"),
    ("St Kitts and Nevis", "KN"),
    ("Saint Kitts", "KN"),
    ("St Kitts", "KN"),
    ("St Lucia", "LC"),
    ("St Vincent and the Grenadines", "VC"),
    ("Saint Vincent", "VC"),
    ("St Vincent", "VC"),
    ("The Bahamas", "BS"),
    ("Bahamas, The", "BS"),
    ("British Honduras", "BZ"),
    ("Dutch Guiana", "SR"),
    ("British Guiana", "GY"),
    ("Falklands", "FK"),
    ("Malvinas", "FK"),
    ("Falkland Islands (Malvinas)", "FK"),
    ("Islas Malvinas", "FK"),
    ("Kalaallit Nunaat", "GL"),
    // Misc official-name variants
    ("Commonwealth of Australia", "AU"),
    ("Kingdom of the Netherlands", "NL"),
    ("French Republic", "FR"),
    ("Italian Republic", "IT"),
    ("Kingdom of Spain", "ES"),
    ("Portuguese Republic", "PT"),
    ("Kingdom of Norway", "NO"),
    ("Kingdom of Sweden", "SE"),
    ("Kingdom of Denmark", "DK"),
    ("Republic of India", "IN"),
    ("Bharat", "IN"),
    ("Islamic Republic of Pakistan", "PK"),
    ("East Pakistan", "BD"),
    ("Republic of the Philippines", "PH"),
    ("Republic of Indonesia", "ID"),
    ("Dutch East Indies", "ID"),
    ("Union of Myanmar", "MM"),
    ("Kingdom of Thailand", "TH"),
    ("State of Israel", "IL"),
    ("Hashemite Kingdom of Jordan", "JO"),
    ("Sultanate of Oman", "OM"),
    ("State of Qatar", "QA"),
    ("Kingdom of Bahrain", "BH"),
    ("State of Kuwait", "KW"),
    ("Republic of Yemen", "YE"),
    ("Republic of Iraq", "IQ"),
    ("Islamic Emirate of Afghanistan", "AF"),
    ("French Southern Territories", "TF"),
];
