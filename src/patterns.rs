//! Static weighted pattern tables for anxiety scoring and trigger
//! detection.
//!
//! All tables are immutable, compiled once at first use, and cover
//! English, Spanish and Portuguese phrasings. Matching is always done
//! against lower-cased text; every regex additionally carries `(?i)`
//! so callers cannot get it wrong.

use regex::Regex;
use std::sync::LazyLock;

/// A case-insensitive regex with an additive weight and a label used
/// for distinct-match counting and diagnostics.
#[derive(Debug)]
pub struct WeightedPattern {
    pub regex: Regex,
    pub weight: f32,
    pub label: &'static str,
}

fn wp(pattern: &str, weight: f32, label: &'static str) -> WeightedPattern {
    WeightedPattern {
        regex: Regex::new(&format!("(?i){}", pattern)).expect("static pattern"),
        weight,
        label,
    }
}

/// Matched patterns from a table, in table order.
pub fn weighted_hits<'a>(patterns: &'a [WeightedPattern], text: &str) -> Vec<&'a WeightedPattern> {
    patterns.iter().filter(|p| p.regex.is_match(text)).collect()
}

/// Sum of matched weights over one table. The single generic pass all
/// score accumulation goes through.
pub fn sum_matched(patterns: &[WeightedPattern], text: &str) -> f32 {
    weighted_hits(patterns, text).iter().map(|p| p.weight).sum()
}

/// Highest multiplier among matching modifier patterns; 1.0 when none
/// match. Sub-1.0 modifiers do apply when they are the only match.
pub fn max_multiplier(patterns: &[WeightedPattern], text: &str) -> f32 {
    let hits = weighted_hits(patterns, text);
    if hits.is_empty() {
        return 1.0;
    }
    hits.iter().map(|p| p.weight).fold(f32::MIN, f32::max)
}

/// Emergency/risk phrases. Any match short-circuits scoring and the
/// weight is returned directly as the anxiety level.
pub static EMERGENCY_PATTERNS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"kill myself|end my life|suicid|don'?t want to (live|be alive)|quitarme la vida|matarme|acabar con mi vida|no quiero vivir|me matar|tirar (a )?minha vida|acabar com a minha vida|não quero (mais )?viver",
            10.0,
            "suicidal_ideation",
        ),
        wp(
            r"hurt myself|harm myself|self[- ]harm|cut(ting)? myself|hacerme daño|lastimarme|cortarme|me machucar|me cortar",
            9.0,
            "self_harm",
        ),
        wp(
            r"can'?t go on|want to disappear|no puedo más|quiero desaparecer|não aguento mais|quero desaparecer",
            8.0,
            "despair",
        ),
    ]
});

/// Anxiety-dimension patterns, grouped by dimension and severity tier.
/// Severe ~2.0-3.0, moderate ~0.8-1.5, mild ~0.5.
pub static DIMENSION_PATTERNS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        // physical
        wp(
            r"heart (is )?(racing|pounding)|can'?t breathe|chest (pain|tightness|feels tight)|corazón acelerado|no puedo respirar|opresión en el pecho|coração (acelerado|disparado)|não consigo respirar",
            2.5,
            "physical_severe",
        ),
        wp(
            r"shak(ing|y)|trembling|sweat(ing|y)|dizzy|nauseous|temblando|sudando|mareado|tremendo|suando|tonto",
            1.2,
            "physical_moderate",
        ),
        wp(
            r"tense|tension|knot in my stomach|tenso|nudo en el estómago|nó no estômago",
            0.5,
            "physical_mild",
        ),
        // cognitive
        wp(
            r"can'?t stop (thinking|worrying)|racing thoughts|losing (my mind|control)|no puedo dejar de pensar|pensamientos acelerados|perdiendo (la cabeza|el control)|não consigo parar de pensar|perdendo (a cabeça|o controle)",
            2.2,
            "cognitive_severe",
        ),
        wp(
            r"overthink(ing)?|can'?t (focus|concentrate)|mind goes blank|no puedo concentrarme|não consigo (me )?concentrar|pensando demais",
            1.0,
            "cognitive_moderate",
        ),
        wp(
            r"worr(ied|ying)|preocupad[oa]|preocupação|distracted|distraíd[oa]",
            0.5,
            "cognitive_mild",
        ),
        // emotional
        wp(
            r"terrified|panick(ing|ed)|panic attack|overwhelmed completely|aterrad[oa]|ataque de pánico|en pánico|apavorad[oa]|ataque de pânico",
            2.5,
            "emotional_severe",
        ),
        wp(
            r"overwhelmed|so anxious|really scared|desperate|abrumad[oa]|muy ansios[oa]|desesperad[oa]|sobrecarregad[oa]|muito ansios[oa]",
            1.2,
            "emotional_moderate",
        ),
        wp(
            r"nervous|uneasy|on edge|nervios[oa]|inquiet[oa]|nervos[oa]",
            0.5,
            "emotional_mild",
        ),
        // behavioral
        wp(
            r"can'?t leave (the house|my room)|avoiding everyone|stopped (going out|eating)|no puedo salir de casa|evitando a todos|dejé de comer|não consigo sair de casa|parei de comer",
            2.0,
            "behavioral_severe",
        ),
        wp(
            r"avoiding|procrastinat(e|ing)|pacing|biting my nails|evitando|postergando|mordiéndome las uñas|adiando|roendo as unhas",
            0.8,
            "behavioral_moderate",
        ),
        wp(
            r"restless|fidget(y|ing)|inquieto|irrequiet[oa]",
            0.5,
            "behavioral_mild",
        ),
        // sleep
        wp(
            r"haven'?t slept (in days|for days)|can'?t sleep at all|no (he dormido|duermo) (en días|nada)|não durmo há dias|não consigo dormir nada",
            2.0,
            "sleep_severe",
        ),
        wp(
            r"can'?t sleep|insomnia|waking up at night|no puedo dormir|insomnio|me despierto en la noche|não consigo dormir|insônia|acordo de madrugada",
            1.0,
            "sleep_moderate",
        ),
        wp(
            r"sleeping badly|tired all the time|duermo mal|cansad[oa] todo el (día|tiempo)|durmo mal|cansad[oa] o tempo todo",
            0.5,
            "sleep_mild",
        ),
    ]
});

/// General moderate-distress phrases not tied to a single dimension.
pub static MODERATE_DISTRESS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"i (can'?t|cannot) (handle|take|cope with) (this|it|anything)|no puedo (manejar|soportar) esto|não consigo lidar com isso",
            1.5,
            "cant_cope",
        ),
        wp(
            r"everything is (falling apart|going wrong|too much)|todo (se derrumba|sale mal|es demasiado)|tudo (está desmoronando|dá errado|é demais)",
            1.3,
            "falling_apart",
        ),
        wp(
            r"i don'?t know what to do|no sé qué hacer|não sei o que fazer",
            0.8,
            "helpless",
        ),
    ]
});

/// Behavioral-distress phrases (what the user has started or stopped
/// doing because of the anxiety).
pub static BEHAVIORAL_DISTRESS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"cry(ing)? (all|every) (day|night)|llorando tod[oa]s? l[oa]s? (días|noches)|chorando tod[oa]s? [oa]s? (dias|noites)",
            1.5,
            "crying_daily",
        ),
        wp(
            r"can'?t get out of bed|no puedo levantarme de la cama|não consigo sair da cama",
            1.3,
            "cant_get_up",
        ),
        wp(
            r"drinking (more|too much)|bebiendo (más|demasiado)|bebendo (mais|demais)",
            1.0,
            "coping_drinking",
        ),
    ]
});

/// Communication-distress phrases (how the user talks about talking).
pub static COMMUNICATION_DISTRESS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"i (have|had) no one to talk to|can'?t tell anyone|no tengo con quién hablar|não tenho com quem falar",
            1.2,
            "no_outlet",
        ),
        wp(
            r"nobody understands( me)?|nadie me entiende|ninguém me entende",
            1.0,
            "not_understood",
        ),
        wp(
            r"i keep it (all )?(inside|to myself)|me lo guardo todo|guardo tudo para mim",
            0.8,
            "bottling_up",
        ),
    ]
});

/// Duration modifiers applied to the summed dimension score. Weight is
/// the multiplier, 0.8-1.5; highest matching one wins, default 1.0.
pub static DURATION_MODIFIERS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"for (years|months)|always been|my whole life|desde hace (años|meses)|toda (mi|la) vida|há (anos|meses)|a vida (inteira|toda)",
            1.5,
            "chronic",
        ),
        wp(
            r"every (day|night|week)|all the time|constantly|cada (día|noche)|todo el tiempo|constantemente|todos os dias|o tempo todo",
            1.3,
            "frequent",
        ),
        wp(
            r"sometimes|now and then|a veces|de vez en cuando|às vezes",
            1.0,
            "occasional",
        ),
        wp(
            r"(just|only) (today|this week)|since (yesterday|this morning)|recién|desde (ayer|hoy)|desde (ontem|hoje)",
            0.8,
            "recent",
        ),
    ]
});

/// Intensity modifiers, second independent multiplier, 0.7-1.4.
pub static INTENSITY_MODIFIERS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"extremely|unbearab(le|ly)|completely|totally|extremadamente|insoportable|completamente|totalmente|insuportável",
            1.4,
            "extreme",
        ),
        wp(
            r"\bvery\b|really|so much|\bmuy\b|muchísimo|\bmuito\b|demais",
            1.2,
            "strong",
        ),
        wp(
            r"a (little|bit)|slightly|somewhat|un poco|algo|um pouco|levemente",
            0.7,
            "mild",
        ),
    ]
});

/// Acute life stressors, each an additive bonus of 4-6 on top of the
/// multiplied dimension score.
pub static LIFE_STRESSORS: LazyLock<Vec<WeightedPattern>> = LazyLock::new(|| {
    vec![
        wp(
            r"(lost|losing) my job|(got|was|been) (fired|laid off)|perdí mi trabajo|me despidieron|perdi (o|meu) emprego|fui demitid[oa]",
            5.0,
            "job_loss",
        ),
        wp(
            r"can'?t pay (rent|the bills|my bills)|drowning in debt|broke|no puedo pagar (el alquiler|las cuentas)|lleno de deudas|não consigo pagar (o aluguel|as contas)|cheio de dívidas",
            5.0,
            "financial_crisis",
        ),
        wp(
            r"(died|passed away)|funeral|(falleció|murió)|(faleceu|morreu)",
            6.0,
            "bereavement",
        ),
        wp(
            r"(car|motorcycle)? ?(accident|crash(ed)?)|choqué|tuve un accidente|bati o carro|sofri um acidente",
            4.0,
            "accident",
        ),
        wp(
            r"evict(ed|ion)|losing (my|the) (house|apartment)|desalojo|me desalojaron|perdiendo la casa|despejo|perdendo a casa",
            5.0,
            "eviction",
        ),
        wp(
            r"divorc(e|ing|ed)|(my )?(marriage|relationship) (is over|ended)|divorcio|mi matrimonio terminó|divórcio|meu casamento acabou",
            4.0,
            "separation",
        ),
    ]
});

/// Generic negative-affect fallback: "feel" plus a negative adjective.
/// Ensures visible distress is never silently dropped.
pub static NEGATIVE_AFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(feel(ing)?|me siento|sinto|me sinto)[^.!?]{0,40}(bad|awful|terrible|horrible|sad|down|low|empty|mal|triste|fatal|vací[oa]|péssim[oa]|vazi[oa]|pra baixo)",
    )
    .expect("static pattern")
});

/// Topical tokens used for the history-persistence bonus.
pub static TOPIC_TOKENS: &[&str] = &[
    "job", "work", "boss", "money", "rent", "debt", "alone", "lonely", "family", "school",
    "exam", "health", "sleep", "trabajo", "jefe", "dinero", "deuda", "familia",
    "trabalho", "chefe", "dinheiro", "dívida", "sozinh", "família",
];

/// Definition of one real-life concern the detector can identify.
#[derive(Debug)]
pub struct TriggerDef {
    pub key: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub patterns: Vec<WeightedPattern>,
}

pub static TRIGGER_DEFS: LazyLock<Vec<TriggerDef>> = LazyLock::new(|| {
    vec![
        TriggerDef {
            key: "work_dissatisfaction",
            category: "work",
            description: "dissatisfaction or burnout with the current job",
            patterns: vec![
                wp(r"hate my (job|work)|odio mi trabajo|odeio meu (trabalho|emprego)", 1.0, "hate_job"),
                wp(r"sick of (my )?(job|work)|harto de(l| mi) trabajo|farto do (meu )?trabalho", 0.9, "sick_of_job"),
                wp(r"(job|work) is (draining|exhausting|miserable)|mi trabajo me agota|meu trabalho me esgota", 0.8, "draining_job"),
                wp(r"(want to|thinking about) quit(ting)?|quiero renunciar|quero pedir demissão", 0.7, "want_to_quit"),
                wp(r"burn(ed|t)? ?out|quemad[oa] (del|en el) trabajo|esgotad[oa]", 0.7, "burnout"),
            ],
        },
        TriggerDef {
            key: "work_communication",
            category: "work",
            description: "feeling unheard or excluded at work",
            patterns: vec![
                wp(r"(nobody|no one) listens( to me)?|no me escuchan|ninguém me escuta", 1.0, "not_heard"),
                wp(r"(boss|manager) (ignores|doesn'?t listen|dismisses)( me)?|mi jefe me ignora|meu chefe me ignora", 0.9, "boss_ignores"),
                wp(r"can'?t talk to (my )?(boss|manager|coworkers|team)|no puedo hablar con mi jefe|não consigo falar com meu chefe", 0.7, "cant_talk_work"),
                wp(r"left out of (meetings|decisions|everything)|me dejan fuera|me deixam de fora", 0.6, "excluded_at_work"),
            ],
        },
        TriggerDef {
            key: "work_environment",
            category: "work",
            description: "hostile workplace or job insecurity",
            patterns: vec![
                wp(r"(might|going to|about to|could) lose my job|losing my job|get fired|me van a despedir|vou ser demitid[oa]|posso perder (o|meu) emprego", 1.0, "job_insecurity"),
                wp(r"toxic (work(place)?|environment|boss)|ambiente (laboral )?tóxico|ambiente (de trabalho )?tóxico", 0.9, "toxic_workplace"),
                wp(r"layoffs?|recortes de personal|demissões", 0.7, "layoffs"),
                wp(r"(bullied|harassed) at work|acoso laboral|assédio no trabalho", 0.9, "workplace_harassment"),
            ],
        },
        TriggerDef {
            key: "career_direction",
            category: "life_path",
            description: "doubt about career path and professional future",
            patterns: vec![
                wp(r"(wrong|dead[- ]end) (career|path|job)|carrera equivocada|carreira errada", 0.9, "wrong_path"),
                wp(r"don'?t know what i('?m| am) doing with my (life|career)|no sé qué hacer con mi (vida|carrera)|não sei o que fazer da (minha )?(vida|carreira)", 0.9, "career_lost"),
                wp(r"wasted (years|my potential)|stuck in (this|my) (job|career)|estancad[oa] en mi (trabajo|carrera)|estagnad[oa] na carreira", 0.8, "career_stuck"),
                wp(r"too late to (change|start over)|demasiado tarde para cambiar|tarde demais para (mudar|recomeçar)", 0.7, "too_late"),
            ],
        },
        TriggerDef {
            key: "educational_regret",
            category: "life_path",
            description: "regret over past study or training choices",
            patterns: vec![
                wp(r"(should have|shouldn'?t have) studied|studied the wrong (thing|degree|major)|debí estudiar otra cosa|devia ter estudado outra coisa", 1.0, "wrong_degree"),
                wp(r"(regret|waste[d]?) (my|the) (degree|studies|university)|me arrepiento de (mi carrera|haber estudiado)|me arrependo d[ao] (faculdade|curso)", 0.9, "degree_regret"),
                wp(r"never (finished|went to) (school|college|university)|nunca terminé (la escuela|la universidad)|nunca terminei (a escola|a faculdade)", 0.7, "unfinished_studies"),
            ],
        },
        TriggerDef {
            key: "financial_security",
            category: "practical",
            description: "money worries and financial instability",
            patterns: vec![
                wp(r"can'?t (afford|pay)|no puedo pagar|não consigo pagar|no me alcanza (el dinero|para)", 0.9, "cant_afford"),
                wp(r"(money|financial) (problems|worries|stress)|problemas de dinero|problemas financeiros", 0.9, "money_problems"),
                wp(r"\bdebts?\b|deudas?|dívidas?", 0.8, "debt"),
                wp(r"(no|running out of) (money|savings)|sin (dinero|ahorros)|sem (dinheiro|economias)", 0.8, "no_savings"),
            ],
        },
        TriggerDef {
            key: "transportation_crisis",
            category: "practical",
            description: "vehicle accident or loss of transportation",
            patterns: vec![
                wp(r"crash(ed)? (my|the) (car|motorcycle|bike)|(car|traffic) accident|choqué (mi|el) (auto|coche)|tuve un accidente|bati (o|meu) carro|sofri um acidente", 1.2, "vehicle_accident"),
                wp(r"(car|coche|auto|carro) (broke down|se descompuso|quebrou)", 0.8, "vehicle_breakdown"),
                wp(r"(no way|can'?t) (to )?get to work|lost my (license|ride)|no tengo cómo llegar|não tenho como chegar", 0.7, "no_transport"),
            ],
        },
        TriggerDef {
            key: "housing_instability",
            category: "practical",
            description: "risk of losing housing or unstable living situation",
            patterns: vec![
                wp(r"evict(ed|ion)|kicked out|desalojo|me echaron|despejo|fui expuls[oa]", 1.0, "eviction_risk"),
                wp(r"can'?t pay (the )?rent|behind on rent|no puedo pagar el alquiler|atrasado con el alquiler|não consigo pagar o aluguel", 0.9, "rent_trouble"),
                wp(r"nowhere to (live|stay)|losing (my|the) (house|apartment|home)|sin dónde vivir|perdendo (a casa|o apartamento)", 0.9, "losing_home"),
            ],
        },
        TriggerDef {
            key: "social_disconnection",
            category: "social",
            description: "isolation and lack of support network",
            patterns: vec![
                wp(r"(don'?t have|haven'?t got) (anybody|anyone)|(nobody|no one) to (help|turn to|count on)( me)?|no tengo a nadie|não tenho ninguém", 1.0, "no_support"),
                wp(r"(all |so |completely )?alone|lonely|sol[oa] en esto|me siento sol[oa]|(tão |completamente )?sozinh[oa]", 0.8, "lonely"),
                wp(r"no friends|lost touch with everyone|sin amigos|perdí contacto con todos|sem amigos|perdi contato com todo mundo", 0.8, "no_friends"),
                wp(r"isolat(ed|ing)|aislad[oa]|isolad[oa]", 0.7, "isolation"),
            ],
        },
        TriggerDef {
            key: "relationship_conflict",
            category: "social",
            description: "conflict with a partner or close relationship",
            patterns: vec![
                wp(r"(fight|argument)s? with (my )?(partner|wife|husband|boyfriend|girlfriend)|peleas con mi pareja|brigas com (meu|minha) (parceir[oa]|namorad[oa])", 0.9, "partner_fights"),
                wp(r"(relationship|marriage) (is )?(falling apart|in trouble)|mi relación se derrumba|meu (casamento|relacionamento) está desmoronando", 0.9, "relationship_trouble"),
                wp(r"(broke|breaking) up|terminamos|rompimos|terminamos o namoro", 0.8, "breakup"),
            ],
        },
        TriggerDef {
            key: "family_pressure",
            category: "social",
            description: "family expectations or conflict",
            patterns: vec![
                wp(r"(my )?family (pressures?|expects|doesn'?t approve)|mi familia (me presiona|espera)|minha família (me pressiona|espera)", 0.9, "family_expectations"),
                wp(r"(fight|argument)s? with (my )?(parents|mother|father|mom|dad)|peleas con mis (padres|papás)|brigas com (meus pais|minha mãe|meu pai)", 0.8, "family_fights"),
                wp(r"disappoint(ing|ed) my (family|parents)|decepcionar a mi familia|decepcionar minha família", 0.8, "family_disappointment"),
            ],
        },
        TriggerDef {
            key: "self_worth",
            category: "identity",
            description: "low self-esteem and feelings of inadequacy",
            patterns: vec![
                wp(r"(i('?m| am)|feel) (worthless|useless|a failure|not (good )?enough)|soy un fracaso|no valgo nada|me siento inútil|sou um fracasso|não sirvo para nada|me sinto inútil", 1.0, "worthless"),
                wp(r"everyone is (better|ahead of me)|todos son mejores que yo|todo mundo é melhor que eu", 0.8, "comparison"),
                wp(r"disappoint(ed)? in myself|hate myself|decepcionad[oa] de mí|me odio|decepcionad[oa] comigo|me odeio", 0.9, "self_disappointment"),
            ],
        },
        TriggerDef {
            key: "health_concern",
            category: "emotional",
            description: "worry about one's own or a loved one's health",
            patterns: vec![
                wp(r"(waiting for|scared of) (test|exam) results|(afraid|scared) (it('?s| is)|of) (cancer|something serious)|esperando resultados|miedo de que sea (cáncer|algo grave)|medo de que seja (câncer|algo grave)", 1.0, "health_fear"),
                wp(r"\b(diagnosis|diagnosed|illness|seriously ill|enfermedad|doença|doente)\b", 0.7, "illness"),
                wp(r"(something|algo|alguma coisa) (is )?wrong with (me|my body)|algo anda mal conmigo|tem algo errado comigo", 0.8, "body_worry"),
            ],
        },
        TriggerDef {
            key: "future_uncertainty",
            category: "existential",
            description: "dread about the future and lack of direction",
            patterns: vec![
                wp(r"(scared|terrified|afraid) of the future|miedo (d)?el futuro|medo do futuro", 1.0, "future_fear"),
                wp(r"what('?s| is) the point|life has no (meaning|direction)|nada tiene sentido|qué sentido tiene|nada faz sentido|qual é o sentido", 0.9, "meaninglessness"),
                wp(r"everything is uncertain|don'?t know (where|how) (i('?m| am) going|this ends)|todo es incierto|no sé a dónde voy|tudo é incerto|não sei para onde vou", 0.8, "uncertainty"),
            ],
        },
    ]
});

/// A named combination of co-occurring triggers treated as one more
/// severe situation.
#[derive(Debug)]
pub struct CompoundRule {
    pub name: &'static str,
    pub description: &'static str,
    /// Every key here must be among the qualifying triggers.
    pub required: &'static [&'static str],
    /// If non-empty, at least one of these must also qualify.
    pub any_of: &'static [&'static str],
    /// Catch-all form: fires when `required` co-occurs with any other
    /// qualifying trigger at all.
    pub any_other: bool,
}

pub static COMPOUND_RULES: &[CompoundRule] = &[
    CompoundRule {
        name: "job_communication_frustration",
        description: "frustrated with the job and unheard within it",
        required: &["work_dissatisfaction", "work_communication"],
        any_of: &[],
        any_other: false,
    },
    CompoundRule {
        name: "accident_financial_job_crisis",
        description: "an accident cascading into money and job fears",
        required: &["transportation_crisis"],
        any_of: &["financial_security", "work_environment"],
        any_other: false,
    },
    CompoundRule {
        name: "career_identity_crisis",
        description: "career doubt entangled with self-worth",
        required: &["career_direction", "self_worth"],
        any_of: &[],
        any_other: false,
    },
    CompoundRule {
        name: "financial_housing_pressure",
        description: "money trouble threatening housing",
        required: &["financial_security", "housing_instability"],
        any_of: &[],
        any_other: false,
    },
    CompoundRule {
        name: "isolated_multi_stressor",
        description: "facing other stressors without a support network",
        required: &["social_disconnection"],
        any_of: &[],
        any_other: true,
    },
];

/// Trigger subset that empirically correlates with higher anxiety;
/// their presence adds a reconciler multiplier.
pub static HIGH_ANXIETY_TRIGGERS: &[&str] = &[
    "self_worth",
    "educational_regret",
    "career_direction",
    "work_environment",
    "transportation_crisis",
    "social_disconnection",
];

/// All statically defined trigger-category ids.
pub static CATEGORY_IDS: &[&str] = &[
    "work",
    "identity",
    "social",
    "practical",
    "life_path",
    "existential",
    "emotional",
];

/// Language-appropriate label substrings for each category, used by
/// the selecting-trigger stage to read the user's choice. The category
/// id itself always matches.
pub fn category_labels(category: &str) -> &'static [&'static str] {
    match category {
        "work" => &["work", "job", "trabajo", "empleo", "trabalho", "emprego"],
        "identity" => &["identity", "myself", "self-worth", "identidad", "autoestima", "identidade"],
        "social" => &["social", "friends", "relationship", "family", "amigos", "familia", "pareja", "família", "relacionamento"],
        "practical" => &["practical", "money", "finances", "housing", "dinero", "vivienda", "dinheiro", "moradia"],
        "life_path" => &["life path", "career", "direction", "studies", "carrera", "rumbo", "carreira", "rumo"],
        "existential" => &["existential", "future", "meaning", "futuro", "sentido"],
        "emotional" => &["emotional", "health", "feelings", "salud", "emociones", "saúde", "emoções"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_compile() {
        // Force every LazyLock so a bad regex fails here, not in prod.
        assert!(!EMERGENCY_PATTERNS.is_empty());
        assert!(!DIMENSION_PATTERNS.is_empty());
        assert!(!MODERATE_DISTRESS.is_empty());
        assert!(!BEHAVIORAL_DISTRESS.is_empty());
        assert!(!COMMUNICATION_DISTRESS.is_empty());
        assert!(!DURATION_MODIFIERS.is_empty());
        assert!(!INTENSITY_MODIFIERS.is_empty());
        assert!(!LIFE_STRESSORS.is_empty());
        assert!(!TRIGGER_DEFS.is_empty());
        let _ = &*NEGATIVE_AFFECT;
    }

    #[test]
    fn emergency_weights_in_band() {
        for p in EMERGENCY_PATTERNS.iter() {
            assert!((8.0..=10.0).contains(&p.weight), "{}", p.label);
        }
    }

    #[test]
    fn compound_rules_reference_defined_triggers() {
        let keys: Vec<&str> = TRIGGER_DEFS.iter().map(|t| t.key).collect();
        for rule in COMPOUND_RULES {
            for key in rule.required.iter().chain(rule.any_of.iter()) {
                assert!(keys.contains(key), "{} references unknown {}", rule.name, key);
            }
        }
        for key in HIGH_ANXIETY_TRIGGERS {
            assert!(keys.contains(key));
        }
    }

    #[test]
    fn trigger_categories_are_defined() {
        for def in TRIGGER_DEFS.iter() {
            assert!(CATEGORY_IDS.contains(&def.category), "{}", def.key);
            assert!(!category_labels(def.category).is_empty());
        }
    }

    #[test]
    fn multilingual_emergency_coverage() {
        for text in [
            "i want to kill myself",
            "quiero quitarme la vida",
            "não aguento mais",
        ] {
            assert!(!weighted_hits(&EMERGENCY_PATTERNS, text).is_empty(), "{text}");
        }
    }

    #[test]
    fn max_multiplier_defaults_to_one() {
        assert_eq!(max_multiplier(&DURATION_MODIFIERS, "hello there"), 1.0);
        assert_eq!(max_multiplier(&DURATION_MODIFIERS, "it has been like this for years"), 1.5);
    }
}
