// Endpoint registry: the two supported chains and the Cosmos SDK REST
// modules exposed by both. Everything here is static and kept in menu
// order so numbering is identical on every run.

use crate::error::RegistryError;

/// A chain the tool can talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub key: &'static str,
    pub name: &'static str,
    pub base_url: String,
    pub description: &'static str,
}

/// A single REST endpoint. `path` holds `{param}` tokens, one for each
/// entry of `params`.
#[derive(Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub key: &'static str,
    pub name: &'static str,
    pub path: &'static str,
    pub params: &'static [&'static str],
}

#[derive(Debug, PartialEq, Eq)]
pub struct Module {
    pub key: &'static str,
    pub name: &'static str,
    pub endpoints: &'static [Endpoint],
}

impl Module {
    pub fn endpoint(&self, key: &str) -> Option<&'static Endpoint> {
        self.endpoints.iter().find(|e| e.key == key)
    }
}

pub const DEFAULT_CHAIN: &str = "evm";

const fn endpoint(
    key: &'static str,
    name: &'static str,
    path: &'static str,
    params: &'static [&'static str],
) -> Endpoint {
    Endpoint { key, name, path, params }
}

pub static MODULES: &[Module] = &[
    Module {
        key: "auth",
        name: "Authentication & Accounts",
        endpoints: &[
            endpoint("account", "Get account details", "cosmos/auth/v1beta1/accounts/{address}", &["address"]),
            endpoint("accounts", "List all accounts", "cosmos/auth/v1beta1/accounts", &[]),
            endpoint("params", "Get auth parameters", "cosmos/auth/v1beta1/params", &[]),
        ],
    },
    Module {
        key: "bank",
        name: "Bank & Balances",
        endpoints: &[
            endpoint("balances", "Get account balances", "cosmos/bank/v1beta1/balances/{address}", &["address"]),
            endpoint(
                "balance",
                "Get specific token balance",
                "cosmos/bank/v1beta1/balances/{address}/by_denom?denom={denom}",
                &["address", "denom"],
            ),
            endpoint("supply", "Get total supply", "cosmos/bank/v1beta1/supply", &[]),
            endpoint("denom_metadata", "Get token metadata", "cosmos/bank/v1beta1/denoms_metadata", &[]),
        ],
    },
    Module {
        key: "gov",
        name: "Governance",
        endpoints: &[
            endpoint("proposals", "List proposals", "cosmos/gov/v1/proposals", &[]),
            endpoint("proposal", "Get proposal details", "cosmos/gov/v1/proposals/{proposal_id}", &["proposal_id"]),
            endpoint("tally", "Get proposal tally", "cosmos/gov/v1/proposals/{proposal_id}/tally", &["proposal_id"]),
            endpoint("votes", "Get proposal votes", "cosmos/gov/v1/proposals/{proposal_id}/votes", &["proposal_id"]),
            endpoint(
                "deposits",
                "Get proposal deposits",
                "cosmos/gov/v1/proposals/{proposal_id}/deposits",
                &["proposal_id"],
            ),
            endpoint("params", "Get governance parameters", "cosmos/gov/v1/params", &[]),
        ],
    },
    Module {
        key: "staking",
        name: "Staking",
        endpoints: &[
            endpoint("validators", "List validators", "cosmos/staking/v1beta1/validators", &[]),
            endpoint(
                "validator",
                "Get validator details",
                "cosmos/staking/v1beta1/validators/{validator_addr}",
                &["validator_addr"],
            ),
            endpoint(
                "delegations",
                "Get delegations",
                "cosmos/staking/v1beta1/delegations/{delegator_addr}",
                &["delegator_addr"],
            ),
            endpoint(
                "delegation",
                "Get specific delegation",
                "cosmos/staking/v1beta1/delegators/{delegator_addr}/validators/{validator_addr}",
                &["delegator_addr", "validator_addr"],
            ),
            endpoint(
                "unbonding_delegations",
                "Get unbonding delegations",
                "cosmos/staking/v1beta1/delegators/{delegator_addr}/unbonding_delegations",
                &["delegator_addr"],
            ),
            endpoint(
                "redelegations",
                "Get redelegations",
                "cosmos/staking/v1beta1/delegators/{delegator_addr}/redelegations",
                &["delegator_addr"],
            ),
            endpoint("pool", "Get staking pool", "cosmos/staking/v1beta1/pool", &[]),
            endpoint("params", "Get staking parameters", "cosmos/staking/v1beta1/params", &[]),
        ],
    },
    Module {
        key: "distribution",
        name: "Distribution & Rewards",
        endpoints: &[
            endpoint(
                "rewards",
                "Get delegation rewards",
                "cosmos/distribution/v1beta1/delegators/{delegator_addr}/rewards",
                &["delegator_addr"],
            ),
            endpoint(
                "commission",
                "Get validator commission",
                "cosmos/distribution/v1beta1/validators/{validator_addr}/commission",
                &["validator_addr"],
            ),
            endpoint("community_pool", "Get community pool", "cosmos/distribution/v1beta1/community_pool", &[]),
            endpoint("params", "Get distribution parameters", "cosmos/distribution/v1beta1/params", &[]),
        ],
    },
    Module {
        key: "slashing",
        name: "Slashing",
        endpoints: &[
            endpoint("signing_infos", "Get signing infos", "cosmos/slashing/v1beta1/signing_infos", &[]),
            endpoint(
                "signing_info",
                "Get validator signing info",
                "cosmos/slashing/v1beta1/signing_infos/{cons_address}",
                &["cons_address"],
            ),
            endpoint("params", "Get slashing parameters", "cosmos/slashing/v1beta1/params", &[]),
        ],
    },
    Module {
        key: "mint",
        name: "Minting",
        endpoints: &[
            endpoint("inflation", "Get current inflation", "cosmos/mint/v1beta1/inflation", &[]),
            endpoint("annual_provisions", "Get annual provisions", "cosmos/mint/v1beta1/annual_provisions", &[]),
            endpoint("params", "Get minting parameters", "cosmos/mint/v1beta1/params", &[]),
        ],
    },
    Module {
        key: "tendermint",
        name: "Tendermint Core",
        endpoints: &[
            endpoint("node_info", "Get node info", "cosmos/base/tendermint/v1beta1/node_info", &[]),
            endpoint("syncing", "Get syncing status", "cosmos/base/tendermint/v1beta1/syncing", &[]),
            endpoint("latest_block", "Get latest block", "cosmos/base/tendermint/v1beta1/blocks/latest", &[]),
            endpoint(
                "block_by_height",
                "Get block by height",
                "cosmos/base/tendermint/v1beta1/blocks/{height}",
                &["height"],
            ),
            endpoint("validatorsets", "Get validator sets", "cosmos/base/tendermint/v1beta1/validatorsets/latest", &[]),
        ],
    },
];

/// Read-only view over the chains and modules. Chains are owned so a base
/// URL can be re-pointed before the session starts.
#[derive(Debug, Clone)]
pub struct Registry {
    chains: Vec<Chain>,
    modules: &'static [Module],
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Cronos EVM first (the default), then Cronos POS.
    pub fn builtin() -> Self {
        let chains = vec![
            Chain {
                key: "evm",
                name: "Cronos EVM Chain",
                base_url: "https://rest.cronos.org/".into(),
                description: "Cronos EVM-compatible chain for smart contracts and DeFi (DEFAULT)",
            },
            Chain {
                key: "pos",
                name: "Cronos POS Chain",
                base_url: "https://rest.mainnet.crypto.org/".into(),
                description: "Cronos Proof-of-Stake chain for Cosmos SDK modules",
            },
        ];
        Registry { chains, modules: MODULES }
    }

    /// Point `chain` at a different origin. Unknown keys are ignored.
    pub fn with_base_url(mut self, chain: &str, base_url: impl Into<String>) -> Self {
        if let Some(c) = self.chains.iter_mut().find(|c| c.key == chain) {
            c.base_url = base_url.into();
        }
        self
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn modules(&self) -> &'static [Module] {
        self.modules
    }

    pub fn chain(&self, key: &str) -> Result<&Chain, RegistryError> {
        self.chains
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| RegistryError::UnknownChain(key.to_string()))
    }

    pub fn module(&self, key: &str) -> Option<&'static Module> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Resolve an endpoint. Every module is served by both chains, but the
    /// chain key still has to exist.
    pub fn lookup(&self, chain: &str, module: &str, endpoint: &str) -> Result<&'static Endpoint, RegistryError> {
        let not_found = || RegistryError::NotFound {
            chain: chain.to_string(),
            module: module.to_string(),
            endpoint: endpoint.to_string(),
        };
        self.chain(chain).map_err(|_| not_found())?;
        self.module(module)
            .and_then(|m| m.endpoint(endpoint))
            .ok_or_else(not_found)
    }
}

/// Friendly prompt label for a path parameter.
pub fn param_prompt(param: &str) -> String {
    match param {
        "address" => "Enter address".into(),
        "proposal_id" => "Enter proposal number".into(),
        "validator_addr" => "Enter validator address".into(),
        "delegator_addr" => "Enter delegator address".into(),
        "cons_address" => "Enter consensus address".into(),
        "height" => "Enter block height".into(),
        "denom" => "Enter token denomination".into(),
        other => format!("Enter {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::placeholders;

    #[test]
    fn module_order_is_stable() {
        let keys: Vec<_> = Registry::builtin().modules().iter().map(|m| m.key).collect();
        assert_eq!(
            keys,
            ["auth", "bank", "gov", "staking", "distribution", "slashing", "mint", "tendermint"]
        );
    }

    #[test]
    fn evm_is_first_chain() {
        let registry = Registry::builtin();
        assert_eq!(registry.chains()[0].key, DEFAULT_CHAIN);
        assert_eq!(registry.chains()[1].key, "pos");
    }

    #[test]
    fn template_tokens_match_declared_params() {
        for module in MODULES {
            for ep in module.endpoints {
                let tokens = placeholders(ep.path);
                assert_eq!(tokens, ep.params, "{}/{}", module.key, ep.key);
            }
        }
    }

    #[test]
    fn endpoint_keys_are_unique_per_module() {
        for module in MODULES {
            let mut keys: Vec<_> = module.endpoints.iter().map(|e| e.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), module.endpoints.len(), "{}", module.key);
        }
    }

    #[test]
    fn lookup_finds_known_endpoint() {
        let registry = Registry::builtin();
        let ep = registry.lookup("pos", "staking", "delegation").unwrap();
        assert_eq!(ep.params, ["delegator_addr", "validator_addr"]);
    }

    #[test]
    fn denom_balance_sends_denom() {
        let ep = Registry::default().lookup("pos", "bank", "balance").unwrap();
        assert_eq!(placeholders(ep.path), ["address", "denom"]);
        assert!(ep.path.ends_with("by_denom?denom={denom}"));
    }

    #[test]
    fn lookup_reports_missing_keys() {
        let registry = Registry::builtin();
        for (chain, module, endpoint) in [
            ("cosmoshub", "bank", "supply"),
            ("evm", "ibc", "supply"),
            ("evm", "bank", "nope"),
        ] {
            assert_eq!(
                registry.lookup(chain, module, endpoint),
                Err(RegistryError::NotFound {
                    chain: chain.into(),
                    module: module.into(),
                    endpoint: endpoint.into(),
                })
            );
        }
    }

    #[test]
    fn base_url_can_be_repointed() {
        let registry = Registry::builtin().with_base_url("pos", "http://127.0.0.1:1317/");
        assert_eq!(registry.chain("pos").unwrap().base_url, "http://127.0.0.1:1317/");
        assert_eq!(registry.chain("evm").unwrap().base_url, "https://rest.cronos.org/");
    }

    #[test]
    fn param_prompts_have_friendly_labels() {
        assert_eq!(param_prompt("proposal_id"), "Enter proposal number");
        assert_eq!(param_prompt("pagination.key"), "Enter pagination.key");
    }
}
