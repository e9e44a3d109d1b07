//! Constructor parameter validation for the coordinator.

use crate::error::GovernanceError;
use moove_types::DaoParams;

/// Check every coordinator-level constructor parameter.
///
/// Token-level checks (cap versus initial mints) are left to the token
/// ledger's own deployment.
pub fn validate_params(params: &DaoParams) -> Result<(), GovernanceError> {
    if params.name.trim().is_empty() {
        return Err(GovernanceError::InvalidInputValue { field: "name" });
    }
    if params.symbol.trim().is_empty() {
        return Err(GovernanceError::InvalidInputValue { field: "symbol" });
    }
    if params.cap == 0 {
        return Err(GovernanceError::InvalidInputValue { field: "cap" });
    }
    if params.token_price.is_zero() {
        return Err(GovernanceError::InvalidInputValue {
            field: "token_price",
        });
    }
    if params.minimum_token_staked_to_make_a_proposal == 0 {
        return Err(GovernanceError::InvalidInputValue {
            field: "minimum_token_staked_to_make_a_proposal",
        });
    }
    if params.minimum_circulating_supply_to_make_a_proposal_in_percent > 100 {
        return Err(GovernanceError::InvalidInputValue {
            field: "minimum_circulating_supply_to_make_a_proposal_in_percent",
        });
    }
    if params.proposal_quorum_percent > 100 {
        return Err(GovernanceError::InvalidInputValue {
            field: "proposal_quorum_percent",
        });
    }
    if params.slashing_percent > 100 {
        return Err(GovernanceError::InvalidInputValue {
            field: "slashing_percent",
        });
    }
    if params.voting_period_in_days == 0 {
        return Err(GovernanceError::InvalidInputValue {
            field: "voting_period_in_days",
        });
    }
    if params.older_users_mint_supply > 0 && params.older_users_addresses.is_empty() {
        return Err(GovernanceError::OlderUsersListEmpty);
    }
    Ok(())
}
