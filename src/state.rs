use std::sync::Arc;

use crate::hypotheses::HypothesisCatalog;
use crate::papers::csv::HeaderMode;
use crate::supabase::SupabaseClient;

pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub hypotheses: Arc<HypothesisCatalog>,
    pub header_mode: HeaderMode,
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;
