use alloy::network::EthereumWallet;
use anyhow::{Context, Result, bail};
use args::{CliArgs, Operation};
use bind_contract_clients::BindClient;
use chain_args::ChainContext;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::display::{AccountStatus, display_account, display_ledger_accounts};
use crate::keystore::TemporaryAccount;
use crate::workflow::{BindOutcome, Workflow};

mod args;
mod config;
mod consts;
mod display;
mod keystore;
mod ledger;
mod workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy()
        .add_directive("alloy=warn".parse()?)
        .add_directive("coins_ledger=warn".parse()?);

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true))
        .with(filter)
        .init();

    let args = CliArgs::parse();
    let ctx = args.chain.resolve();
    info!(
        network = %ctx.network,
        chain_id = ctx.chain_id,
        rpc_url = %ctx.rpc_url,
        operation = ?args.operation,
        "Starting token bind tool"
    );

    match args.operation {
        Operation::InitKey => init_key(&args, &ctx).await,
        Operation::DeployContract => {
            let config = args.bind_config()?;
            let client = temp_client(&args, &ctx).await?;
            Workflow::new(&client, &ctx)
                .deploy_contract(&config.contract_data)
                .await?;
            Ok(())
        }
        Operation::ApproveBindAndTransferOwnership => {
            let token = args.bep20_contract()?;
            let config = args.bind_config()?;
            let client = temp_client(&args, &ctx).await?;
            let outcome = Workflow::new(&client, &ctx)
                .approve_bind_and_transfer_ownership(&config, token)
                .await?;
            match outcome {
                BindOutcome::Confirmed { .. } => info!(
                    token = %token,
                    bep2_symbol = %config.bep2_symbol,
                    owner = %config.ledger_account,
                    "Bind approved and ownership transferred"
                ),
                BindOutcome::Rejected { reject, .. } => warn!(
                    token = %token,
                    bep2_symbol = %config.bep2_symbol,
                    reject_success = reject.success,
                    "Bind was rejected, ownership not transferred"
                ),
                BindOutcome::Failed { bind } => {
                    bail!("Approve bind failed. Tx hash: {:?}", bind.tx_hash)
                }
            }
            Ok(())
        }
        Operation::RefundRestBnb => {
            let refund_to = args.refund_address()?;
            let client = temp_client(&args, &ctx).await?;
            Workflow::new(&client, &ctx)
                .refund_rest_bnb(refund_to)
                .await?;
            Ok(())
        }
        Operation::DeployTransferTokenAndOwnershipRefund => {
            let config = args.bind_config()?;
            let client = temp_client(&args, &ctx).await?;
            let contract = Workflow::new(&client, &ctx)
                .deploy_transfer_refund(&config)
                .await?;
            info!(
                contract = %contract,
                owner = %config.ledger_account,
                "Contract deployed, supply and ownership transferred, rest BNB refunded"
            );
            Ok(())
        }
        Operation::ApproveBindFromLedger => approve_bind_from_ledger(&args, &ctx).await,
    }
}

async fn init_key(args: &CliArgs, ctx: &ChainContext) -> Result<()> {
    let account = TemporaryAccount::get_or_create(&args.keystore_path, &args.keystore_password)?;
    let status = if account.created {
        AccountStatus::Created
    } else {
        AccountStatus::Loaded
    };
    display_account(status, account.address(), ctx, None);
    info!(key_file = %account.key_file.display(), "Temporary account key file");

    if args.derive_ledger_accounts {
        let accounts = ledger::derive_accounts(args.ledger_account_number, ctx.chain_id).await?;
        display_ledger_accounts(&accounts, ctx);
        ledger::write_exports(&args.ledger_accounts_file, &accounts)?;
    }
    Ok(())
}

async fn approve_bind_from_ledger(args: &CliArgs, ctx: &ChainContext) -> Result<()> {
    let token = args.bep20_contract()?;
    let amount = args.peggy_amount()?;
    let config = args.bind_config()?;

    let (wallet, address) = ledger::open_wallet(args.ledger_account_index, ctx.chain_id).await?;
    let client = connect(args, ctx, wallet).await?;
    let balance = client
        .get_balance()
        .await
        .context("Failed to get ledger account balance")?;
    display_account(AccountStatus::Ledger, address, ctx, Some(balance));

    match Workflow::new(&client, ctx)
        .approve_bind_from_ledger(&config.bep2_symbol, token, amount)
        .await?
    {
        BindOutcome::Confirmed { .. } => {
            info!(token = %token, bep2_symbol = %config.bep2_symbol, amount = %amount, "Bind approved");
            Ok(())
        }
        BindOutcome::Failed { bind } | BindOutcome::Rejected { bind, .. } => {
            bail!(
                "Approve bind from ledger account {address} failed. Tx hash: {:?}",
                bind.tx_hash
            )
        }
    }
}

/// Unlock the temporary account and connect it to the selected network.
async fn temp_client(args: &CliArgs, ctx: &ChainContext) -> Result<BindClient> {
    let account = TemporaryAccount::get_or_create(&args.keystore_path, &args.keystore_password)?;
    let client = connect(args, ctx, EthereumWallet::from(account.signer.clone())).await?;

    let balance = client
        .get_balance()
        .await
        .context("Failed to get temporary account balance")?;
    let status = if account.created {
        AccountStatus::Created
    } else {
        AccountStatus::Loaded
    };
    display_account(status, account.address(), ctx, Some(balance));
    Ok(client)
}

async fn connect(args: &CliArgs, ctx: &ChainContext, wallet: EthereumWallet) -> Result<BindClient> {
    let client = BindClient::new(&ctx.rpc_url, wallet, args.poll_config())?;
    let chain_id = client
        .chain_id()
        .await
        .with_context(|| format!("Failed to reach RPC endpoint {}", ctx.rpc_url))?;
    ensure_chain_id(ctx, chain_id)?;
    Ok(client)
}

/// Refuse an endpoint serving a different chain than the selected network.
fn ensure_chain_id(ctx: &ChainContext, chain_id: u64) -> Result<()> {
    if chain_id != ctx.chain_id {
        bail!(
            "RPC endpoint {} serves chain id {chain_id}, expected {} for {}",
            ctx.rpc_url,
            ctx.chain_id,
            ctx.network
        );
    }
    Ok(())
}
