use alloy::primitives::{Address, U256, utils::format_ether};
use chain_args::ChainContext;
use term_table::row::Row;
use term_table::table_cell::{Alignment as CellAlignment, TableCell};
use term_table::{Table, TableStyle};
use tracing::{info, warn};

use crate::ledger::derivation_path;

/// Which kind of account a banner describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Temporary account generated by this run, needs funding
    Created,
    /// Existing temporary account unlocked from the keystore
    Loaded,
    /// Account held by the Ledger device
    Ledger,
}

/// Render the account banner with address, explorer link and optional balance
pub fn account_banner(
    status: AccountStatus,
    address: Address,
    ctx: &ChainContext,
    balance: Option<U256>,
) -> String {
    let mut table = Table::new();
    table.style = TableStyle::extended();

    let header = match status {
        AccountStatus::Created => "Temporary Account Created",
        AccountStatus::Loaded => "Temporary Account Loaded",
        AccountStatus::Ledger => "Ledger Account",
    };
    table.add_row(Row::new(vec![TableCell::builder(header)
        .col_span(2)
        .alignment(CellAlignment::Center)
        .build()]));

    table.add_row(label_row("Address", address.to_string()));
    table.add_row(label_row("Explorer", ctx.address_url(address)));
    if let Some(balance) = balance {
        table.add_row(label_row("Balance", format!("{} BNB", format_ether(balance))));
    }
    table.add_row(label_row(
        "Network",
        format!("{} (chain id {})", ctx.network, ctx.chain_id),
    ));

    if status == AccountStatus::Created {
        table.add_row(Row::new(vec![TableCell::builder(
            "Fund this address with BNB before deploying",
        )
        .col_span(2)
        .alignment(CellAlignment::Center)
        .build()]));
    }

    table.render()
}

/// Log the account banner, warning when the account still needs funding
pub fn display_account(
    status: AccountStatus,
    address: Address,
    ctx: &ChainContext,
    balance: Option<U256>,
) {
    let banner = account_banner(status, address, ctx, balance);
    if status == AccountStatus::Created || balance.is_some_and(|b| b.is_zero()) {
        warn!("\n{banner}");
    } else {
        info!("\n{banner}");
    }
}

/// Log the derived Ledger accounts, one row per derivation index
pub fn display_ledger_accounts(accounts: &[Address], ctx: &ChainContext) {
    let mut table = Table::new();
    table.style = TableStyle::extended();
    table.add_row(Row::new(vec![
        TableCell::new("Index"),
        TableCell::new("Path"),
        TableCell::new("Address"),
    ]));
    for (index, address) in accounts.iter().enumerate() {
        table.add_row(Row::new(vec![
            TableCell::new(index),
            TableCell::new(derivation_path(index as u32)),
            TableCell::new(address),
        ]));
    }
    info!(network = %ctx.network, "Ledger accounts\n{}", table.render());
}

fn label_row(label: &str, value: String) -> Row {
    Row::new(vec![
        TableCell::builder(label)
            .alignment(CellAlignment::Right)
            .build(),
        TableCell::builder(value)
            .alignment(CellAlignment::Left)
            .build(),
    ])
}
