//! Default word lists seeded into the store on install

use super::{CategoryKey, ContentCategory, RatingTier, WordCategories, SPECIAL_LIST_KEY};

const U_LANGUAGE: &[&str] = &[
    "damn", "damned", "damning", "dammit", "dayum", "daayum", "goddammit", "hell", "helled",
    "hellhole", "hell-", "god", "godded", "gawd", "goddammit", "godd*mn", "jesus", "jsus",
    "jesus chrst", "christ", "christed", "chrst", "jeezus chrst", "chr***", "butt", "butted",
    "butting", "b**", "buttocks", "buttock", "bum", "bummed", "bumming", "bumhole", "bleeding",
    "bleedin", "blooming", "bloomin", "flipping", "flippin", "scumbag", "scumbags", "pillock",
    "pillocked", "screw", "screwed", "screwing", "jerk", "jerked", "jerking", "j***", "jerkoff",
    "jerk-", "goddamn", "freaking out", "freaked out", "freaking-", "freaked-", "fudging",
];

const PG_LANGUAGE: &[&str] = &[
    "bloody", "bugger", "buggered", "buggering", "buggery", "shit", "shat", "shitting", "shits",
    "shite", "s***", "sh*t", "arsehole", "arseholed", "asshole", "assholed", "ahole", "a*hole",
    "arse", "arsed", "arsing", "a*", "arsehole", "smartarse", "ass", "assed", "assing", "a*s",
    "a**", "asshole", "smartass", "tart", "tarted", "tosser", "bastard", "bastarded",
    "b*******", "basterd", "bollocks", "bollocked", "b******", "balls", "b*llocks", "frig",
    "frigged", "frigging", "frick", "fricking", "frickin", "friggin", "piss", "pissed",
    "pissing", "p***", "crap", "crapped", "crapping", "sod", "sodded", "sodding", "git",
    "gitted", "balls", "balled", "balling", "gobshite", "gobshited", "gob", "tits", "titties",
    "t***", "t**s", "turd", "turds", "cock", "cocked", "cocking", "cocks", "hussy", "hussies",
    "bullshit", "bullshits", "bullsh*t", "bullcrap", "shi-", "sh-ting", "sh--ing", "sh--",
    "sh--ed", "freaking", "freakin", "freak off", "freakoff", "freak-", "fudge", "screw you",
    "fricked", "frick-", "crappy", "crapping", "craped",
];

const TWELVE_LANGUAGE: &[&str] = &[
    "prick", "pricking", "wanker", "w*****", "twat", "twatted", "t***", "t**t", "punani",
    "punanis", "p*****", "p****i", "whore", "whored", "whoring", "whores", "w****", "w**re",
    "bitch", "bitched", "bitching", "bitches", "biatch", "b****", "b*tch", "slag", "pussy",
    "pussies", "p****", "p***y", "fanny", "f***y", "cock", "cocked", "cocking", "cocks", "c***",
    "knob", "knobhead", "knobbing", "k***", "slut", "slutting", "sluts", "s***", "s**t", "slag",
    "slagged", "slagging", "dickhead", "dickheaded", "d*******", "d*ckhead", "dick", "dicked",
    "dicking", "d***", "mofo", "MF", "motherf", "bleep",
];

const FIFTEEN_LANGUAGE: &[&str] = &[
    "motherfucker", "motherfuckers", "m***********", "mutha-", "muthafucka", "mutha..",
    "mother.", "mother-", "mother#", "mother*", "cocksucker", "cocksucked", "cocksucking",
    "c*********", "motherfuck", "motherfuckin", "motherfucking", "mother fucking", "cocksuck",
    "cocksucka", "c u next tuesday", "c.u.n.t", "see you next tuesday", "cunt", "c***",
    "the c-word", "c*cksucker", "cocksuckin", "cocksuckin", "cocksucker", "motherfuck",
    "motherfucked", "m*********", "motherfuckin", "motherfucking", "muthafucking",
    "muthafuckin", "cunt", "cunted", "c***", "the c-word", "c u n t",
];

const EIGHTEEN_LANGUAGE: &[&str] = &[
    "cunt", "cunted", "c***", "c.u.n.t", "c u n t",
];

const U_DISCRIMINATION: &[&str] = &[
    "bender", "bent", "bum", "b*m", "chink", "chinked", "ching chong", "coloured", "colored",
    "cracker", "crackered", "honkey", "honky", "darkie", "darky", "darkey", "dyke", "dyked",
    "fag", "fagged", "f**", "f*g", "faggot", "faggoted", "f**got", "fairy", "fairied", "f**ry",
    "gay", "gayed", "g*y", "gaylord", "gaylords", "g**lord", "gypsy", "gypsied", "hobo",
    "hobos", "homo", "homos", "jap", "nip", "jappo", "kraut", "krauted", "midget", "midgets",
    "monkey", "monkeys", "nancy", "nancies", "negro", "negros", "pansy", "pansies", "queen",
    "queened", "queer", "queered", "queering", "q****", "q***r", "spastic", "spastics", "spaz",
    "spook", "tramp", "tramped", "tramping", "gays", "queers", "freak", "freaks",
];

const PG_DISCRIMINATION: &[&str] = &[
    "batty boy", "b*y boy", "b** boy", "battyman", "fag hag", "f** hag", "f*g h**", "fag-hag",
    "gypo", "gypoed", "half-breed", "half-bred", "half-caste", "half-casted", "jungle bunny",
    "jungle bunnies", "kike", "kiked", "k**", "pikey", "pikeys", "poof", "poofed", "poofter",
    "pooftered", "shirtlifter", "shirtlifted", "slant-eye", "slant-eyed", "tranny", "trannies",
    "t****", "wog", "wogs", "bender", "bent", "bending", "chink", "chinked", "ching chong",
    "ch*nk", "coloured", "colored", "cracker", "crackered", "honky", "honkey", "darkie",
    "darky", "darkey", "dyke", "dyked", "d**e", "fag", "fagged", "f**", "f*g", "faggot",
    "fairy", "fairied", "gay", "gayed", "gaylord", "gaylords", "g**lord", "gypsy", "gypsied",
    "gypo", "homo", "homos", "h**o", "jap", "j*p", "nip", "jappo", "midget", "midgets",
    "monkey", "monkeys", "nancy", "nancies", "negro", "negros", "pansy", "pansies", "queen",
    "queened", "queer", "queered", "q***r", "spastic", "spastics", "spaz", "spook", "gays",
    "queers", "freak", "freaks", "bum", "b*m",
];

const TWELVE_DISCRIMINATION: &[&str] = &[
    "muff diver", "muff dived", "nigga", "niggas", "n****", "n***a", "niggah", "niggha", "niga",
    "nigger", "niggers", "n*****", "the n-word", "nigga", "niggress", "neega", "paki", "pakis",
    "retard", "retarded", "retarding", "r******", "r*****d", "spaz", "spazzed", "spastic",
    "batty boy", "batty", "b*y boy", "b** boy", "battyman", "fag hag", "f** hag", "f*g h**",
    "fag-hag", "faggot", "faggoted", "f**got", "gypo", "gypoed", "gypsy", "jungle bunny",
    "jungle bunnies", "kike", "kiked", "k**", "pikey", "pikeys", "poof", "poofed", "poofter",
    "pooftered", "shirtlifter", "shirtlifted", "slant-eye", "slant-eyed", "tranny", "trannies",
    "t*****", "wog", "wogs", "bender", "bent", "chink", "chinked", "ching chong", "ch*nk",
    "coloured", "colored", "cracker", "crackered", "honky", "honkey", "honkie", "darkie",
    "darky", "darkey", "dyke", "dyked", "d**e", "fag", "fagged", "f**", "f*g", "faggot",
    "fairy", "fairied", "gay", "gayed", "g*y", "g**", "gaylord", "gaylords", "g**lord", "homo",
    "homos", "midget", "midgets", "monkey", "monkeys", "nancy", "nancies", "negro", "negros",
    "pansy", "pansies", "queen", "queened", "queer", "queered", "queering", "q***r", "spastic",
    "spastics", "spaz", "spook", "gays", "queers", "freak", "freaks", "bummer",
];

const U_SEX_REFERENCES: &[&str] = &[
    "romance", "romantic", "pregnancy", "cuddling", "sharing a bed", "boyfriend", "girlfriend",
    "cuddle", "romances", "boyfriends", "girlfriends", "reproduction", "virgin mary",
    "conception", "dating", "date", "hot", "smooch", "smaker", "kissing", "kisses", "kiss",
    "pregnant", "preggo", "intimate", "prego", "harem", "concubine",
];

const PG_SEX_REFERENCES: &[&str] = &[
    "sleeping with", "making love", "going to bed with", "virginity", "having sex",
    "getting lucky", "making out", "doing it", "hooking up", "sleeping", "bodice-ripper",
    "budgie-smugglers", "ecchi", "floozy", "gagging", "gigolo", "escort", "knockers",
    "meat and two veg", "pink", "contraception", "sexual touch", "seminude", "nude", "naked",
    "breast", "boob", "tit", "butt", "areola", "nipple", "skinny dipping", "sexualised",
    "intercourse", "intimate relationship", "sexual relationship", "lovemaking", "fornication",
    "fling", "promiscuity", "hook up", "sex", "sexual activity", "touch me", "consenting adult",
    "consensual sex", "we slept together", "we had sex", "sleeping together", "kiss", "simping",
    "upskert", "nsfw", "explicit", "derobe", "hookup", "hook-up", "slept with", "virgin",
    "sexy", "cheat", "cheating", "cheated", "affair", "affairs", "simp", "teasing", "sexually",
    "sexual", "mature content",
];

const TWELVE_SEX_REFERENCES: &[&str] = &[
    "masturbate", "masturbation", "oral ", "oral sex", "giving head", "fingering", "lube",
    "finger bang", "finger-bang", "orgasm", "semen", "spunk", "jizz", "come", "cum", "cumming",
    "fetish", "spanking", "porn", "sex work", "whore", "pimp", "pimping", "prostitute",
    "hooker", "ho", "slut", "slag", "fuck", "fucker", "fucking", "shagging", "bang", "banging",
    "fuckin", "fucked", "sexting", "erection", "hung", "jerkoff", "jerk ", "jerk-", "jerking",
    "pornograph", "pornographic", "pornography", "shagged", "back shot", "boner", "bum fun",
    "butt plug", "cockblock", "finish first", "fuckboy", "furry", "gag", "gagging", "gigolo",
    "hentai", "knee-trembler", "nosh", "randy", "rentboy", "rimjob", "rimming", "rim",
    "blowjob", "blow", "handjob", "hand job", "bj", "s & m", "scat", "schlong", "stiffy",
    "swinger", "wang", "stiff", "cuck", "cuckold", "butt-", "butt ", "buttsex", "screwing",
    "back shots", "chewie", "casting couch", "cockblocker", "vagina", "infidelity", "penis",
    "vulva", "pubic hair", "starkers", "sausage", "hooters", "melons", "sixty nine", "69",
    "ball sucking", "boob grab", "streakers", "cock", "g-spot", "screwed", "booty", "hump",
    "pelvic thrusting", "doggy", "pussy", "breast job", "thrusting", "missionary position",
    "cow girl", "reverse cow girl", "titty fuck", "vaginal sex", "paizuri", "penetration",
    "ass ", "anal ", "dry hump", "humping", "cunnilingus", "boob suck", "tribadism", "grindin",
    "queening", "man milk", "edging", "wanker", "love juice", "roleplay", "boink", "moaning",
    "panting", "sex toys", "pleasure point", "g spot", "felching", "mastuwaiting", "orgasmic",
    "sploshing", "wet", "foreplay", "hickey", "labia", "milf", "rainbow kiss", "swingers",
    "hanky-panky", "bulge", "creampie", "dirty talk", "yoni", "yoni massage", "condom",
    "rubber", "playboy", "playgirl", "whore", "erotic", "arous", "ejactulating", "hard on",
    "horny", "blow job", "ejaculate", "ejaculation", "puss", "brothel", "fornicating", "wiener",
    "clitoris", "clit", "crotch", "vibrator", "dildo", "pantyhose", "pounding", "polygamy",
    "polyamory", "suck", "morning wood", "fondling", "bdsm", "kamasutra", "arousal",
    "striptease", "strip tease", "stripteasing", "strip teasing", "strip", "fishnet stockings",
    "onlyfans", "pornstar", "camgirl", "camgirls", "night walker", "stripper", "pole dance",
    "lap dancer", "lap dancing", "lap dance", "poledance", "pole dancer", "pole dancing",
    "nightwalker", "streetwalker", "street walker", "jerk it", "moan", "harlot", "harlots",
    "harloting", "prostitution", "footjob", "affair", "affairs", "sensual", "pleasure",
    "happy ending", "sucker", "sucks", "sucking", "sucked", "happy-ending", "strip club",
    "skank", "wanked", "wanking", "wankoff", "dilf", "sugar daddy", "sugar mommy",
    "sugar daddies", "sugar dad", "masturbating", "playmate", "seductive", "seduce",
    "seduction", "seduced", "seducing", "orgy",
];

const FIFTEEN_SEX_REFERENCES: &[&str] = &[
    "fisting", "gangbang", "gang bang", "gang-bang", "necrophilia", "incest", "beastiality",
    "bestiality", "bdsm", "urolagnia", "choking", "pornography", "porn", "pornograph",
    "pornographic", "bondage", "cuck", "cuckold", "rimjob", "rimming", "rim", "s & m", "scat",
    "hentai", "gunt", "gag furry", "dp", "butt plug", "butt fuck", "butt fucked", "rim job",
    "fellatio", "face fucking", "breast licking", "breast mouthing", "kink", "deep throating",
    "pegging", "squirting", "rough sex", "threesome", "foursome", "deflowering",
    "sadomasochism", "kama sutra", "teen ag", "blind fold", "dominatrix", "dominatric",
    "pornhub", "jerkmate", "bukkake", "pornstar", "pornsite", "glory hole", "gloryhole",
    "porno", "porn star", "porn sites", "porn-sites", "porn-site", "porn site", "edgemaxxing",
    "goon", "gooning", "goonmaxxing", "edge-maxxing", "atm", "-porn", "non-consensual",
];

const FIFTEEN_SEXUAL_VIOLENCE: &[&str] = &[
    "underage", "harassment", "sexual violence", "non-consensual sexual activity",
    "sexual threat", "marital rape", "pedophile", "molest", "forced sex", "child pornography",
    "force him on her", "force them on her", "force her on her", "force him on him",
    "force them on him", "force them on them", "rape", "raped", "rapist", "raping", "rapin",
    "harass", "eve teasing", "eve-teasing", "cyberbullying", "manipulation", "pedophilia",
    "pedo", "paedo", "grooming", "molestation", "molested", "molester", "molesting",
    "sexually assaulted", "sexual assault", "sex trafficked", "trafficker", "trafficked",
    "traffickers", "harassed", "sexually violated", "sexually abused", "abuser", "abused",
    "sodomized", "sodomy", "unsolicited", "groping", "groped", "trafficking", "blackmail",
    "blackmailing", "blackmailed", "coerced", "coercing", "stalking", "stalker", "stalked",
    "revenge porn", "revenge-porn", "gangrape", "gangraped", "gangrapes", "gangraping",
    "child-abuse", "child abuse", "coercion", "offender",
];

const U_DRUGS: &[&str] = &[
    "smoking", "smokes", "vaping", "vapes", "pipe", "tobacco", "nicotine", "cigar", "cigarette",
    "e-cigarette", "e-cigar", "alcohol", "beer", "whiskey", "rum", "champagne", "vodka", "wine",
    "ale", "gin", "tequila", "mezcal", "brandy", "cognac", "armagnac", "liqueurs", "cocktails",
    "cider", "sake", "toddy", "kombucha", "opium wars", "cigarettes", "stogy", "stogie",
];

const PG_DRUGS: &[&str] = &[
    "sedative", "painkillers", "pain pills", "pain pill", "paracetamol", "caugh syrup",
    "narcotic", "narcotics", "drug dealer", "drug traffic", "drug", "addiction", "addicted",
    "addict", "prescribed", "prescription", "caugh drink", "drugged", "illegal substance",
    "illegal substances", "controlled substances", "overdose", "od", "over dose", "dosage",
    "doseover", "dose over", "get high", "getting high", "tripping", "weed", "marijuana",
    "weed", "cannabis", "hash", "bhang", "gummies", "mushrooms", "hookha", "hookah",
    "rehabilitation", "relapse", "relapsed", "relapsing", "rehabilitated", "rehabilitating",
    "cannabinoids", "lysergic acid diethylamide", "cathinones", "psychoactive", "valium",
    "diazepam", "ativan", "lorazepam", "alprazolam", "hydrocodone", "ritalin", "ambien",
    "barbiturates", "acetone", "toluene", "wasted", "rolling paper", "rolling-paper",
    "withdrawal", "bong", "syringe", "hallucinogens", "snuff blade", "kava", "vape", "opm",
    "paraphernalia", "candyflip", "ganja", "stash", "dope", "inhaling", "joint", "blunt",
    "crackcocaine", "cocainecrack", "drugs", "sedation",
];

const TWELVE_DRUGS: &[&str] = &[
    "smack", "cocaine", "heroin", "brown", "fentanyl", "oxycontin", "oxycodone", "oxy", "opium",
    "opiates", "opiate", "coke", "charlie", "blow", "ketamine", "coco", "crack", "meth",
    "methamphetamine", "speed", "crack-cocaine", "amphetamine", "crystal meth", "crystal meth",
    "crystalmeth", "rocks", "lsd", "acid", "hallucinogens", "ayahuasca", "peyote", "marijuana",
    "weed", "cannabis", "hash", "grass", "pot", "ganja", "gummies", "edibles", "psilocybin",
    "magic shrooms", "shroom", "shrooms", "magic mushrooms", "mushroom", "magic mushroom",
    "magic shroom", "brownie", "ecstacy", "mdma", "molly", "pills", "perc", "percocet",
    "acetaminophen", "opioid", "prescription", "pain reliever", "pain pill", "pain pills",
    "sleeping pills", "sleeping pill", "syrup", "lean", "roophies", "solvents", "aerosol",
    "amyl nitrate", "poppers", "painkillers", "painkiller", "adderall", "xanny", "xany",
    "xanax", "rohypnol", "roofies", "benzodiazepine", "quaaludes", "laughing gas",
    "nitrous oxide", "whippets", "whippits", "whip-its", "purple drank", "purple-drank",
    "promethazine", "sizzurp", "codeine", "snorting", "injecting", "inject", "snort", "high",
    "tripping", "hashish", "bath salts", "cannabinoids", "lysergic acid diethylamide",
    "cathinones", "psychoactive", "valium", "diazepam", "ativan", "lorazepam", "alprazolam",
    "hydrocodone", "ritalin", "ambien", "barbiturates", "acetone", "toluene", "reefer",
];

const U_RACIAL_LANGUAGE: &[&str] = &[
    "colored", "coloured",
];

const PG_RACIAL_LANGUAGE: &[&str] = &[
    "negro", "colored", "coloured",
];

const TWELVE_RACIAL_LANGUAGE: &[&str] = &[
    "nigga", "niggas", "n****", "n***a", "niggah", "niggha", "niga", "nigger", "niggers",
    "n*****", "the n-word", "nigga", "niggress", "neega",
];

/// Special List variants, also the search set when the store holds none
pub const SPECIAL_VARIANTS: &[&str] = &[
    "fuck", "fuckin", "fucked", "fucking", "fucker", "fuckers", "fucks", "fuckoff", "fuck-",
    "fuckinhell", "fuckup", "----", "----ing", "----ed", "----ers", "----in", "****", "****in",
    "****ing", "****ed", "----off", "****off", "*******", "******", "____ing", "____ed", "____",
    "____in", "____off", "bleep", "feck", "feckoff", "feckin", "fecking", "fecked", "phuck",
    "phucking", "phucked", "phuckin", "f***", "f***ing", "f***in", "f---ing", "f---", "f---ed",
    "eff", "effed", "effin", "effing", "f word", "fuc", "fucin", "the f", "omfg", "wtf", "mf",
    "f no", "stfu", "snafu", "fecks", "fook", "fookin", "fookup", "fooked", "fooking", "fooks",
    "effu", "fu", "f u", "f up", "f-off", "f off",
];

const PRELOADED: &[(RatingTier, ContentCategory, &[&str])] = &[
    (RatingTier::U, ContentCategory::Language, U_LANGUAGE),
    (RatingTier::PG, ContentCategory::Language, PG_LANGUAGE),
    (RatingTier::Twelve, ContentCategory::Language, TWELVE_LANGUAGE),
    (RatingTier::Fifteen, ContentCategory::Language, FIFTEEN_LANGUAGE),
    (RatingTier::Eighteen, ContentCategory::Language, EIGHTEEN_LANGUAGE),
    (RatingTier::U, ContentCategory::Discrimination, U_DISCRIMINATION),
    (RatingTier::PG, ContentCategory::Discrimination, PG_DISCRIMINATION),
    (RatingTier::Twelve, ContentCategory::Discrimination, TWELVE_DISCRIMINATION),
    (RatingTier::U, ContentCategory::SexReferences, U_SEX_REFERENCES),
    (RatingTier::PG, ContentCategory::SexReferences, PG_SEX_REFERENCES),
    (RatingTier::Twelve, ContentCategory::SexReferences, TWELVE_SEX_REFERENCES),
    (RatingTier::Fifteen, ContentCategory::SexReferences, FIFTEEN_SEX_REFERENCES),
    (RatingTier::Fifteen, ContentCategory::SexualViolence, FIFTEEN_SEXUAL_VIOLENCE),
    (RatingTier::U, ContentCategory::Drugs, U_DRUGS),
    (RatingTier::PG, ContentCategory::Drugs, PG_DRUGS),
    (RatingTier::Twelve, ContentCategory::Drugs, TWELVE_DRUGS),
    (RatingTier::U, ContentCategory::RacialLanguage, U_RACIAL_LANGUAGE),
    (RatingTier::PG, ContentCategory::RacialLanguage, PG_RACIAL_LANGUAGE),
    (RatingTier::Twelve, ContentCategory::RacialLanguage, TWELVE_RACIAL_LANGUAGE),
];

/// Build the preloaded word categories, Special List included
pub fn preloaded_categories() -> WordCategories {
    let mut categories = WordCategories::default();
    for (tier, category, words) in PRELOADED {
        let key = CategoryKey::new(*tier, *category).storage_key();
        categories.insert_list(key, words.iter().map(|w| w.to_string()).collect());
    }
    categories.insert_list(
        SPECIAL_LIST_KEY.to_string(),
        SPECIAL_VARIANTS.iter().map(|w| w.to_string()).collect(),
    );
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preloaded_keys_parse() {
        let categories = preloaded_categories();
        for key in categories.keys() {
            if key == SPECIAL_LIST_KEY {
                continue;
            }
            assert!(key.parse::<CategoryKey>().is_ok(), "unparseable key {}", key);
        }
    }

    #[test]
    fn test_special_list_present() {
        let categories = preloaded_categories();
        let special = categories.get(SPECIAL_LIST_KEY).unwrap();
        assert!(special.iter().any(|w| w == "fuck"));
        assert!(special.iter().any(|w| w == "f***ing"));
    }
}
