// Session state: which chain queries currently go to.

use tracing::info;

use crate::error::RegistryError;
use crate::registry::{Chain, Registry, DEFAULT_CHAIN};

/// Holds the registry and the selected chain for one interactive run.
#[derive(Debug, Clone)]
pub struct Session {
    registry: Registry,
    current: usize,
}

impl Session {
    /// Starts on the EVM chain when the registry has it, otherwise on the
    /// first chain listed.
    pub fn new(registry: Registry) -> Self {
        let current = registry
            .chains()
            .iter()
            .position(|c| c.key == DEFAULT_CHAIN)
            .unwrap_or(0);
        Session { registry, current }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn current_chain(&self) -> &Chain {
        &self.registry.chains()[self.current]
    }

    /// Select `key` as the current chain. An unknown key leaves the
    /// selection untouched.
    pub fn switch_chain(&mut self, key: &str) -> Result<&Chain, RegistryError> {
        let idx = self
            .registry
            .chains()
            .iter()
            .position(|c| c.key == key)
            .ok_or_else(|| RegistryError::UnknownChain(key.to_string()))?;
        self.current = idx;
        let chain = self.current_chain();
        info!(chain = chain.key, base_url = %chain.base_url, "switched chain");
        Ok(chain)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_evm() {
        let session = Session::default();
        assert_eq!(session.current_chain().key, "evm");
        assert_eq!(session.current_chain().base_url, "https://rest.cronos.org/");
    }

    #[test]
    fn switches_to_known_chain() {
        let mut session = Session::default();
        let chain = session.switch_chain("pos").unwrap();
        assert_eq!(chain.name, "Cronos POS Chain");
        assert_eq!(session.current_chain().base_url, "https://rest.mainnet.crypto.org/");
    }

    #[test]
    fn unknown_chain_keeps_selection() {
        let mut session = Session::default();
        session.switch_chain("pos").unwrap();
        let err = session.switch_chain("osmosis").unwrap_err();
        assert_eq!(err, RegistryError::UnknownChain("osmosis".into()));
        assert_eq!(session.current_chain().key, "pos");
    }
}
