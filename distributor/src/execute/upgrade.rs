//! Logic upgrade handlers.
//!
//! The contract is its own chain admin. `UpgradeTo` records the request and
//! dispatches a self-migration; the `migrate` entry point refuses to run
//! unless that request is present.

use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response, WasmMsg};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::layout::{upgrade_layout, SlotSpec};
use crate::msg::MigrateMsg;
use crate::roles::ensure_owner;
use crate::state::{
    LogicInfo, PendingUpgrade, CONTRACT_NAME, CONTRACT_VERSION, LOGIC_INFO, PENDING_UPGRADE,
};

/// Request migration of this contract to `new_code_id`.
pub fn execute_upgrade_to(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_code_id: u64,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    PENDING_UPGRADE.save(
        deps.storage,
        &PendingUpgrade {
            new_code_id,
            requested_by: info.sender.clone(),
            requested_at: env.block.time,
        },
    )?;

    let migrate = WasmMsg::Migrate {
        contract_addr: env.contract.address.to_string(),
        new_code_id,
        msg: to_json_binary(&MigrateMsg {})?,
    };

    Ok(Response::new()
        .add_message(migrate)
        .add_attribute("method", "upgrade_to")
        .add_attribute("new_code_id", new_code_id.to_string())
        .add_attribute("requested_by", info.sender))
}

/// Install the logic described by `layout` over the existing storage.
pub fn apply_upgrade(
    deps: DepsMut,
    env: Env,
    layout: &[SlotSpec],
) -> Result<Response, ContractError> {
    let pending = PENDING_UPGRADE
        .may_load(deps.storage)?
        .ok_or(ContractError::Unauthorized)?;

    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::ContractNameMismatch {
            stored: stored.contract,
            expected: CONTRACT_NAME.to_string(),
        });
    }

    upgrade_layout(deps.storage, layout)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    LOGIC_INFO.save(
        deps.storage,
        &LogicInfo {
            code_id: pending.new_code_id,
            version: CONTRACT_VERSION.to_string(),
            installed_at: env.block.time,
        },
    )?;
    PENDING_UPGRADE.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION)
        .add_attribute("code_id", pending.new_code_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{record_layout, schema_of, slot, CURRENT_LAYOUT};
    use crate::state::OWNER;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{Addr, CosmosMsg, Uint128};

    fn seed(deps: DepsMut) {
        set_contract_version(deps.storage, CONTRACT_NAME, "0.0.1").unwrap();
        OWNER.save(deps.storage, &Addr::unchecked("owner")).unwrap();
        record_layout(deps.storage, CURRENT_LAYOUT).unwrap();
    }

    #[test]
    fn test_upgrade_to_dispatches_self_migration() {
        let mut deps = mock_dependencies();
        seed(deps.as_mut());
        let env = mock_env();

        let res = execute_upgrade_to(deps.as_mut(), env.clone(), mock_info("owner", &[]), 7)
            .unwrap();
        assert_eq!(
            res.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Migrate {
                contract_addr: env.contract.address.to_string(),
                new_code_id: 7,
                msg: to_json_binary(&MigrateMsg {}).unwrap(),
            })
        );
        assert_eq!(
            PENDING_UPGRADE.load(deps.as_ref().storage).unwrap().new_code_id,
            7
        );
    }

    #[test]
    fn test_upgrade_to_requires_owner() {
        let mut deps = mock_dependencies();
        seed(deps.as_mut());

        let err = execute_upgrade_to(deps.as_mut(), mock_env(), mock_info("admin", &[]), 7)
            .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized);
        assert!(!PENDING_UPGRADE.exists(deps.as_ref().storage));
    }

    #[test]
    fn test_apply_without_request_rejected() {
        let mut deps = mock_dependencies();
        seed(deps.as_mut());

        let err = apply_upgrade(deps.as_mut(), mock_env(), CURRENT_LAYOUT).unwrap_err();
        assert_eq!(err, ContractError::Unauthorized);
    }

    #[test]
    fn test_apply_records_logic() {
        let mut deps = mock_dependencies();
        seed(deps.as_mut());
        execute_upgrade_to(deps.as_mut(), mock_env(), mock_info("owner", &[]), 9).unwrap();

        let res = apply_upgrade(deps.as_mut(), mock_env(), CURRENT_LAYOUT).unwrap();
        assert!(res
            .attributes
            .iter()
            .any(|a| a.key == "from_version" && a.value == "0.0.1"));

        let logic = LOGIC_INFO.load(deps.as_ref().storage).unwrap();
        assert_eq!(logic.code_id, 9);
        assert_eq!(logic.version, CONTRACT_VERSION);
        assert!(!PENDING_UPGRADE.exists(deps.as_ref().storage));
        assert_eq!(
            get_contract_version(deps.as_ref().storage).unwrap().version,
            CONTRACT_VERSION
        );
    }

    #[test]
    fn test_apply_rejects_reordered_layout() {
        let mut deps = mock_dependencies();
        seed(deps.as_mut());
        execute_upgrade_to(deps.as_mut(), mock_env(), mock_info("owner", &[]), 9).unwrap();

        let mut swapped: Vec<SlotSpec> = CURRENT_LAYOUT.to_vec();
        swapped.swap(4, 5);
        swapped.push(slot("rewards_v2", "Item<Uint128>", schema_of::<Uint128>));

        let err = apply_upgrade(deps.as_mut(), mock_env(), &swapped).unwrap_err();
        assert!(matches!(err, ContractError::IncompatibleLayout { .. }));
    }

    #[test]
    fn test_apply_rejects_foreign_contract() {
        let mut deps = mock_dependencies();
        seed(deps.as_mut());
        set_contract_version(deps.as_mut().storage, "crates.io:cw20-base", "1.0.0").unwrap();
        PENDING_UPGRADE
            .save(
                deps.as_mut().storage,
                &PendingUpgrade {
                    new_code_id: 3,
                    requested_by: Addr::unchecked("owner"),
                    requested_at: mock_env().block.time,
                },
            )
            .unwrap();

        let err = apply_upgrade(deps.as_mut(), mock_env(), CURRENT_LAYOUT).unwrap_err();
        assert!(matches!(err, ContractError::ContractNameMismatch { .. }));
    }
}
