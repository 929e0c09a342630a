//! Static lookup tables for Brazilian city resolution.
//!
//! All tables are read-only `'static` data; nothing in the crate mutates
//! them. Alias and state entries keep both accented and plain spellings
//! because upstream location records arrive in either form.

/// Known spelling/abbreviation variants per normalized city name.
pub const CITY_ALIASES: &[(&str, &[&str])] = &[
    ("belo horizonte", &["belo horizonte", "bh", "belo-horizonte"]),
    ("brasilia", &["brasilia", "brasília", "brasil", "df"]),
    ("curitiba", &["curitiba", "curitiba-pr"]),
    ("porto alegre", &["porto alegre", "porto-alegre", "poa"]),
    ("fortaleza", &["fortaleza", "fortaleza-ce"]),
    ("salvador", &["salvador", "salvador-ba"]),
    ("recife", &["recife", "recife-pe"]),
    ("manaus", &["manaus", "manaus-am"]),
    ("sao paulo", &["sao paulo", "são paulo", "sp", "sao-paulo"]),
    ("rio de janeiro", &["rio de janeiro", "rio", "rj", "rio-de-janeiro"]),
];

/// Lowercased city name to state abbreviation, for display formatting.
pub const CITY_STATES: &[(&str, &str)] = &[
    ("são paulo", "SP"),
    ("sao paulo", "SP"),
    ("rio de janeiro", "RJ"),
    ("campinas", "SP"),
    ("guarulhos", "SP"),
    ("santos", "SP"),
    ("osasco", "SP"),
    ("santo andré", "SP"),
    ("santo andre", "SP"),
    ("são bernardo do campo", "SP"),
    ("sao bernardo do campo", "SP"),
    ("ribeirão preto", "SP"),
    ("ribeirao preto", "SP"),
    ("diadema", "SP"),
    ("jacareí", "SP"),
    ("jacarei", "SP"),
    ("santa gertrudes", "SP"),
    ("taubaté", "SP"),
    ("taubate", "SP"),
    ("tatuí", "SP"),
    ("tatui", "SP"),
    ("piracicaba", "SP"),
    ("araraquara", "SP"),
    ("catanduva", "SP"),
    ("americana", "SP"),
    ("araçatuba", "SP"),
    ("aracatuba", "SP"),
    ("bauru", "SP"),
    ("carapicuíba", "SP"),
    ("carapicuiba", "SP"),
    ("mogi das cruzes", "SP"),
    ("mogi-das-cruzes", "SP"),
    ("imperatriz", "MA"),
];

/// The ten largest cities with known coverage, probed first during
/// discovery and ranked first in the result.
pub const PRIORITY_CITIES: &[&str] = &[
    "são paulo",
    "sao paulo",
    "rio de janeiro",
    "campinas",
    "guarulhos",
    "santos",
    "osasco",
    "santo andré",
    "santo andre",
    "são bernardo do campo",
    "sao bernardo do campo",
    "ribeirão preto",
    "ribeirao preto",
];

/// Tokens that mark a directory "city" value as a test entry, a station
/// code or another non-city. Tokens longer than two characters match by
/// containment; the two-character ones match only exactly, so that real
/// names such as "Manaus" or "Campinas" are not swept up.
pub const NAME_DENYLIST: &[&str] = &[
    "teste",
    "test",
    "n/a",
    "na",
    "none",
    "null",
    "unknown",
    "211004",
    "modo_fixo",
    "modo fixo",
    "tiradentes 2.0",
    "sem nome",
    "indefinido",
    "undefined",
    "cidade tiradentes",
    "grajaú-parelheiros",
    "quality01",
    "quality",
    "quality0",
    "cid.",
    "cid ",
    "usp",
    "ipen",
];
