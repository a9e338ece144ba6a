use crate::types::{CrowdsaleStage, SaleConfig};

/// Tokens minted per base unit in `stage`. The rate is derived from the
/// stage on every read, so the two can never disagree.
pub fn rate_for(config: &SaleConfig, stage: CrowdsaleStage) -> i128 {
    match stage {
        CrowdsaleStage::PreIco => config.pre_rate,
        CrowdsaleStage::Ico => config.rate,
    }
}
