use crate::domain::Language;

pub const ICON_UPLOAD: &str = "⬆";
pub const ICON_TREND_UP: &str = "📈";
pub const ICON_TREND_DOWN: &str = "📉";
pub const ICON_NEUTRAL: &str = "↔";
pub const ICON_WARNING: &str = "⚠";
pub const ICON_TARGET: &str = "🎯";
pub const ICON_SHIELD: &str = "🛡";
pub const ICON_CLOCK: &str = "🕓";
pub const ICON_BACK: &str = "⬅";
pub const ICON_CLOSE: &str = "✖";
pub const ICON_CHECK: &str = "✔";

/// Every user-facing string, one instance per language.
pub struct UiText {
    // --- Header ---
    pub app_title: &'static str,
    pub app_tagline: &'static str,
    pub nav_vision: &'static str,
    pub nav_analytics: &'static str,
    pub access_granted: &'static str,
    pub access_until: &'static str,
    pub storage_degraded: &'static str,

    // --- Pricing ---
    pub pricing_title: &'static str,
    pub pricing_subtitle: &'static str,
    pub plan_silver: &'static str,
    pub plan_silver_desc: &'static str,
    pub plan_silver_btn: &'static str,
    pub plan_gold: &'static str,
    pub plan_gold_desc: &'static str,
    pub plan_gold_btn: &'static str,
    pub plan_expired: &'static str,
    pub plan_expired_desc: &'static str,
    pub trial_used: &'static str,
    pub verify_title: &'static str,
    pub verify_desc: &'static str,
    pub verify_placeholder: &'static str,
    pub verify_btn_activate: &'static str,
    pub verify_btn_cancel: &'static str,
    pub verify_have_code: &'static str,
    pub verify_error: &'static str,
    pub verify_code_used: &'static str,
    pub verify_note: &'static str,

    // --- Upload ---
    pub upload_title: &'static str,
    pub upload_desc: &'static str,
    pub upload_path_hint: &'static str,
    pub upload_load_btn: &'static str,
    pub supports: &'static str,
    pub history_title: &'static str,
    pub no_history: &'static str,

    // --- Preview / analyzing ---
    pub run_engine: &'static str,
    pub cancel: &'static str,
    pub analyzing_title: &'static str,
    pub analyzing_scan: &'static str,
    pub analyzing_pools: &'static str,
    pub analysis_failed: &'static str,
    pub missing_api_key: &'static str,

    // --- Dashboard ---
    pub new_analysis: &'static str,
    pub asset_class: &'static str,
    pub market_bias: &'static str,
    pub confidence: &'static str,
    pub low_confidence_title: &'static str,
    pub low_confidence_desc: &'static str,
    pub liquidity_map: &'static str,
    pub zone_type: &'static str,
    pub zone_price: &'static str,
    pub zone_strength: &'static str,
    pub zone_reason: &'static str,
    pub institutional_reading: &'static str,
    pub market_intent: &'static str,
    pub retail_traps: &'static str,
    pub objective: &'static str,
    pub invalidation_rules: &'static str,
    pub bias_invalidation: &'static str,
    pub setup_invalidation: &'static str,
    pub limitations: &'static str,
    pub execution_setups: &'static str,
    pub setup_primary: &'static str,
    pub setup_confirmation: &'static str,
    pub risk_aggressive: &'static str,
    pub risk_conservative: &'static str,
    pub prob: &'static str,
    pub entry: &'static str,
    pub stop_loss: &'static str,
    pub target: &'static str,
    pub risk_reward: &'static str,
    pub expiry: &'static str,
    pub expired: &'static str,
    pub your_result: &'static str,

    // --- Analytics ---
    pub analytics_title: &'static str,
    pub analytics_desc: &'static str,
    pub no_data_analytics: &'static str,
    pub win_rate: &'static str,
    pub total_trades: &'static str,
    pub global_stats: &'static str,
    pub monthly_breakdown: &'static str,
    pub wins: &'static str,
    pub losses: &'static str,
    pub break_evens: &'static str,
}

pub static UI_TEXT_EN: UiText = UiText {
    app_title: "TRADE VISION",
    app_tagline: "Institutional chart reading",
    nav_vision: "Vision",
    nav_analytics: "Performance",
    access_granted: "ACCESS GRANTED",
    access_until: "until",
    storage_degraded: "Local storage unavailable: session only",

    pricing_title: "Choose your access",
    pricing_subtitle: "Liquidity-based setups from any chart screenshot",
    plan_silver: "SILVER",
    plan_silver_desc: "Free trial, 30 days",
    plan_silver_btn: "Start free trial",
    plan_gold: "GOLD",
    plan_gold_desc: "Full access, 30 days",
    plan_gold_btn: "Pay with PayPal",
    plan_expired: "Your plan has expired",
    plan_expired_desc: "Upgrade to Gold to keep analyzing charts.",
    trial_used: "The free trial has already been used on this device.",
    verify_title: "Payment verification",
    verify_desc: "Once the payment is done you will receive an activation code. Enter it below.",
    verify_placeholder: "GOLD-XXXX",
    verify_btn_activate: "Activate",
    verify_btn_cancel: "Back",
    verify_have_code: "I have a code",
    verify_error: "Invalid activation code.",
    verify_code_used: "This code has already been used.",
    verify_note: "Codes are single use on this device.",

    upload_title: "Upload a chart",
    upload_desc: "Drop a screenshot of any chart onto this window.",
    upload_path_hint: "or type a file path",
    upload_load_btn: "Load",
    supports: "PNG, JPG, WEBP, GIF, BMP",
    history_title: "Recent analyses",
    no_history: "No analysis yet.",

    run_engine: "Run analysis",
    cancel: "Cancel",
    analyzing_title: "ANALYZING",
    analyzing_scan: "Scanning market structure...",
    analyzing_pools: "Mapping liquidity pools...",
    analysis_failed: "Analysis failed",
    missing_api_key: "No API key configured (set GEMINI_API_KEY).",

    new_analysis: "New analysis",
    asset_class: "Asset class",
    market_bias: "Market bias",
    confidence: "Confidence",
    low_confidence_title: "Low confidence",
    low_confidence_desc: "The bias is weak. Consider waiting for a cleaner structure.",
    liquidity_map: "Liquidity map",
    zone_type: "Type",
    zone_price: "Price",
    zone_strength: "Strength",
    zone_reason: "Reason",
    institutional_reading: "Institutional reading",
    market_intent: "Market intent",
    retail_traps: "Retail traps",
    objective: "Liquidity objective",
    invalidation_rules: "Invalidation rules",
    bias_invalidation: "Bias invalidation",
    setup_invalidation: "Setup invalidation",
    limitations: "Limitations",
    execution_setups: "Execution setups",
    setup_primary: "Setup A - Aggressive",
    setup_confirmation: "Setup B - Confirmation",
    risk_aggressive: "AGGRESSIVE",
    risk_conservative: "CONSERVATIVE",
    prob: "prob.",
    entry: "Entry",
    stop_loss: "Stop loss",
    target: "Target",
    risk_reward: "R:R",
    expiry: "Valid until",
    expired: "EXPIRED",
    your_result: "Your result",

    analytics_title: "Performance",
    analytics_desc: "Based on the results you recorded on each setup",
    no_data_analytics: "No recorded results yet",
    win_rate: "Win rate",
    total_trades: "Trades",
    global_stats: "Global distribution",
    monthly_breakdown: "Monthly breakdown",
    wins: "Wins",
    losses: "Losses",
    break_evens: "B.E",
};

pub static UI_TEXT_FR: UiText = UiText {
    app_title: "TRADE VISION",
    app_tagline: "Lecture institutionnelle de graphiques",
    nav_vision: "Vision",
    nav_analytics: "Performance",
    access_granted: "ACCÈS ACTIVÉ",
    access_until: "jusqu'au",
    storage_degraded: "Stockage local indisponible : session uniquement",

    pricing_title: "Choisissez votre accès",
    pricing_subtitle: "Des setups basés sur la liquidité à partir de n'importe quelle capture",
    plan_silver: "SILVER",
    plan_silver_desc: "Essai gratuit, 30 jours",
    plan_silver_btn: "Démarrer l'essai",
    plan_gold: "GOLD",
    plan_gold_desc: "Accès complet, 30 jours",
    plan_gold_btn: "Payer avec PayPal",
    plan_expired: "Votre abonnement a expiré",
    plan_expired_desc: "Passez à Gold pour continuer vos analyses.",
    trial_used: "L'essai gratuit a déjà été utilisé sur cet appareil.",
    verify_title: "Vérification du paiement",
    verify_desc: "Après le paiement vous recevrez un code d'activation. Saisissez-le ci-dessous.",
    verify_placeholder: "GOLD-XXXX",
    verify_btn_activate: "Activer",
    verify_btn_cancel: "Retour",
    verify_have_code: "J'ai un code",
    verify_error: "Code d'activation invalide.",
    verify_code_used: "Ce code a déjà été utilisé.",
    verify_note: "Chaque code n'est utilisable qu'une fois sur cet appareil.",

    upload_title: "Importer un graphique",
    upload_desc: "Déposez une capture de graphique sur cette fenêtre.",
    upload_path_hint: "ou saisissez un chemin de fichier",
    upload_load_btn: "Charger",
    supports: "PNG, JPG, WEBP, GIF, BMP",
    history_title: "Analyses récentes",
    no_history: "Aucune analyse pour le moment.",

    run_engine: "Lancer l'analyse",
    cancel: "Annuler",
    analyzing_title: "ANALYSE EN COURS",
    analyzing_scan: "Lecture de la structure du marché...",
    analyzing_pools: "Cartographie des poches de liquidité...",
    analysis_failed: "L'analyse a échoué",
    missing_api_key: "Aucune clé API configurée (GEMINI_API_KEY).",

    new_analysis: "Nouvelle analyse",
    asset_class: "Classe d'actif",
    market_bias: "Biais de marché",
    confidence: "Confiance",
    low_confidence_title: "Confiance faible",
    low_confidence_desc: "Le biais est faible. Attendez une structure plus claire.",
    liquidity_map: "Carte de liquidité",
    zone_type: "Type",
    zone_price: "Prix",
    zone_strength: "Force",
    zone_reason: "Raison",
    institutional_reading: "Lecture institutionnelle",
    market_intent: "Intention du marché",
    retail_traps: "Pièges retail",
    objective: "Objectif de liquidité",
    invalidation_rules: "Règles d'invalidation",
    bias_invalidation: "Invalidation du biais",
    setup_invalidation: "Invalidation du setup",
    limitations: "Limites",
    execution_setups: "Setups d'exécution",
    setup_primary: "Setup A - Agressif",
    setup_confirmation: "Setup B - Confirmation",
    risk_aggressive: "AGRESSIF",
    risk_conservative: "CONSERVATEUR",
    prob: "prob.",
    entry: "Entrée",
    stop_loss: "Stop loss",
    target: "Objectif",
    risk_reward: "R:R",
    expiry: "Valide jusqu'au",
    expired: "EXPIRÉ",
    your_result: "Votre résultat",

    analytics_title: "Performance",
    analytics_desc: "Basé sur les résultats saisis pour chaque setup",
    no_data_analytics: "Aucun résultat enregistré",
    win_rate: "Taux de réussite",
    total_trades: "Trades",
    global_stats: "Répartition globale",
    monthly_breakdown: "Détail mensuel",
    wins: "Gains",
    losses: "Pertes",
    break_evens: "B.E",
};

pub fn ui_text(language: Language) -> &'static UiText {
    match language {
        Language::En => &UI_TEXT_EN,
        Language::Fr => &UI_TEXT_FR,
    }
}
