//! The treasury interface and its vault implementation.

use crate::error::TreasuryError;
use moove_types::{Address, EthAmount, Timestamp};
use serde::{Deserialize, Serialize};

/// What the governance coordinator needs from a treasury.
pub trait Treasury: Send {
    /// Accept funds forwarded by `sender`.
    fn deposit(
        &mut self,
        sender: &Address,
        amount: EthAmount,
        now: Timestamp,
    ) -> Result<(), TreasuryError>;

    /// Pay `amount` to `recipient`. Gated on `caller`.
    fn withdraw(
        &mut self,
        caller: &Address,
        amount: EthAmount,
        recipient: &Address,
        now: Timestamp,
    ) -> Result<Payout, TreasuryError>;

    fn get_balance(&self) -> EthAmount;
}

/// Funds that left the treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: Address,
    pub amount: EthAmount,
    pub at: Timestamp,
}

/// Audit trail entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasuryEntry {
    Deposit {
        from: Address,
        amount: EthAmount,
        at: Timestamp,
    },
    Withdrawal(Payout),
    EmergencyWithdrawal(Payout),
}

/// ETH vault owned by the team, operated by the DAO.
pub struct TreasuryVault {
    address: Address,
    owner: Address,
    dao: Address,
    balance: EthAmount,
    history: Vec<TreasuryEntry>,
}

impl TreasuryVault {
    pub fn new(address: Address, owner: Address, dao: Address) -> Self {
        tracing::info!(%address, %owner, %dao, "treasury deployed");
        Self {
            address,
            owner,
            dao,
            balance: EthAmount::ZERO,
            history: Vec::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn dao(&self) -> &Address {
        &self.dao
    }

    pub fn history(&self) -> &[TreasuryEntry] {
        &self.history
    }

    /// Drain the whole balance to the owner. Owner only.
    pub fn emergency_withdraw(
        &mut self,
        caller: &Address,
        now: Timestamp,
    ) -> Result<Payout, TreasuryError> {
        if caller != &self.owner {
            return Err(TreasuryError::NotOwner(caller.clone()));
        }
        if self.balance.is_zero() {
            return Err(TreasuryError::NothingToWithdraw);
        }
        let payout = Payout {
            recipient: self.owner.clone(),
            amount: self.balance,
            at: now,
        };
        self.balance = EthAmount::ZERO;
        self.history
            .push(TreasuryEntry::EmergencyWithdrawal(payout.clone()));
        tracing::warn!(amount = %payout.amount, owner = %self.owner, "emergency withdrawal");
        Ok(payout)
    }

    /// Plain ETH from anyone but the DAO is refused.
    pub fn receive_eth(
        &mut self,
        sender: &Address,
        amount: EthAmount,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        self.deposit(sender, amount, now)
    }

    pub fn fallback(&self, _data: &[u8]) -> Result<(), TreasuryError> {
        Err(TreasuryError::UseGovernanceToInteract {
            dao: self.dao.clone(),
        })
    }
}

impl Treasury for TreasuryVault {
    fn deposit(
        &mut self,
        sender: &Address,
        amount: EthAmount,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        if sender != &self.dao {
            return Err(TreasuryError::SendEthToGovernanceToBuyTokens {
                dao: self.dao.clone(),
            });
        }
        if amount.is_zero() {
            return Err(TreasuryError::InvalidInputValue);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TreasuryError::Overflow)?;
        self.history.push(TreasuryEntry::Deposit {
            from: sender.clone(),
            amount,
            at: now,
        });
        tracing::info!(from = %sender, %amount, balance = %self.balance, "treasury deposit");
        Ok(())
    }

    fn withdraw(
        &mut self,
        caller: &Address,
        amount: EthAmount,
        recipient: &Address,
        now: Timestamp,
    ) -> Result<Payout, TreasuryError> {
        if caller != &self.dao {
            return Err(TreasuryError::NotDao(caller.clone()));
        }
        if amount.is_zero() {
            return Err(TreasuryError::InvalidInputValue);
        }
        let remaining =
            self.balance
                .checked_sub(amount)
                .ok_or(TreasuryError::WithdrawExceedsBalance {
                    requested: amount,
                    balance: self.balance,
                })?;
        self.balance = remaining;
        let payout = Payout {
            recipient: recipient.clone(),
            amount,
            at: now,
        };
        self.history.push(TreasuryEntry::Withdrawal(payout.clone()));
        tracing::info!(%recipient, %amount, balance = %self.balance, "treasury withdrawal");
        Ok(payout)
    }

    fn get_balance(&self) -> EthAmount {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> TreasuryVault {
        TreasuryVault::new(
            Address::new("0xtreasury"),
            Address::new("0xteam"),
            Address::new("0xdao"),
        )
    }

    fn dao() -> Address {
        Address::new("0xdao")
    }

    fn now() -> Timestamp {
        Timestamp::new(1_000)
    }

    #[test]
    fn test_starts_empty() {
        assert_eq!(vault().get_balance(), EthAmount::ZERO);
    }

    #[test]
    fn test_only_dao_may_deposit() {
        let mut v = vault();
        let user = Address::new("0xuser");
        assert_eq!(
            v.receive_eth(&user, EthAmount::from_eth(10), now()),
            Err(TreasuryError::SendEthToGovernanceToBuyTokens { dao: dao() })
        );
        v.deposit(&dao(), EthAmount::from_eth(10), now()).unwrap();
        assert_eq!(v.get_balance(), EthAmount::from_eth(10));
        assert_eq!(v.history().len(), 1);
    }

    #[test]
    fn test_withdraw_by_dao() {
        let mut v = vault();
        v.deposit(&dao(), EthAmount::from_eth(100), now()).unwrap();
        let receiver = Address::new("0xreceiver");
        let payout = v
            .withdraw(&dao(), EthAmount::from_eth(10), &receiver, now())
            .unwrap();
        assert_eq!(payout.recipient, receiver);
        assert_eq!(payout.amount, EthAmount::from_eth(10));
        assert_eq!(v.get_balance(), EthAmount::from_eth(90));
    }

    #[test]
    fn test_withdraw_rejections() {
        let mut v = vault();
        v.deposit(&dao(), EthAmount::from_eth(100), now()).unwrap();
        let outsider = Address::new("0xoutsider");
        assert_eq!(
            v.withdraw(&outsider, EthAmount::from_eth(10), &outsider, now()),
            Err(TreasuryError::NotDao(outsider.clone()))
        );
        assert_eq!(
            v.withdraw(&dao(), EthAmount::from_eth(110), &outsider, now()),
            Err(TreasuryError::WithdrawExceedsBalance {
                requested: EthAmount::from_eth(110),
                balance: EthAmount::from_eth(100),
            })
        );
        assert_eq!(
            v.withdraw(&dao(), EthAmount::ZERO, &dao(), now()),
            Err(TreasuryError::InvalidInputValue)
        );
        assert_eq!(v.get_balance(), EthAmount::from_eth(100));
    }

    #[test]
    fn test_emergency_withdraw() {
        let mut v = vault();
        let outsider = Address::new("0xoutsider");
        assert_eq!(
            v.emergency_withdraw(&Address::new("0xteam"), now()),
            Err(TreasuryError::NothingToWithdraw)
        );
        v.deposit(&dao(), EthAmount::from_eth(100), now()).unwrap();
        assert_eq!(
            v.emergency_withdraw(&outsider, now()),
            Err(TreasuryError::NotOwner(outsider.clone()))
        );
        let payout = v.emergency_withdraw(&Address::new("0xteam"), now()).unwrap();
        assert_eq!(payout.amount, EthAmount::from_eth(100));
        assert_eq!(payout.recipient, Address::new("0xteam"));
        assert_eq!(v.get_balance(), EthAmount::ZERO);
    }

    #[test]
    fn test_fallback_points_at_dao() {
        assert_eq!(
            vault().fallback(&[0xde, 0xad]),
            Err(TreasuryError::UseGovernanceToInteract { dao: dao() })
        );
    }
}
