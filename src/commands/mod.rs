use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;

use crate::entity::WalletKind;
use crate::utils::parse_amount;

/// A parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Connect(WalletKind),
    Disconnect,
    Balance,
    Tokens,
    Holdings,
    Create {
        name: String,
        symbol: String,
        decimals: u8,
        initial_supply: f64,
    },
    Mint {
        mint_address: String,
        amount: f64,
        recipient: String,
    },
    Send {
        mint_address: String,
        amount: f64,
        recipient: String,
    },
    Help,
    Quit,
}

/// Register all commands for the help listing
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("connect <phantom|solflare>", "connect a wallet extension"),
        ("disconnect", "disconnect the current wallet"),
        ("balance", "show wallet, SOL balance and created tokens"),
        ("tokens", "list tokens created in this session as JSON"),
        ("holdings", "show SPL token balances of the wallet"),
        (
            "create <name> <symbol> <decimals> <supply>",
            "create a token and mint its initial supply",
        ),
        ("mint <mint> <amount> <recipient>", "mint more of a created token"),
        ("send <mint> <amount> <recipient>", "send a created token"),
        ("help", "display this help message"),
        ("quit", "exit"),
    ]
}

pub fn help_text() -> String {
    let mut text = "Available commands:".to_string();
    for (usage, description) in register_commands() {
        text.push_str(&format!("\n  {:<44} {}", usage, description));
    }
    text
}

/// Split a line into arguments; double quotes group words.
fn tokenize(line: &str) -> Vec<String> {
    lazy_static! {
        static ref ARG: Regex = Regex::new(r#""([^"]*)"|(\S+)"#).unwrap();
    }

    ARG.captures_iter(line)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn amount_arg(value: &str) -> Result<f64> {
    parse_amount(value).ok_or_else(|| anyhow!("Invalid amount: {}", value))
}

pub fn parse_command(line: &str) -> Result<Command> {
    let args = tokenize(line);
    let Some((name, rest)) = args.split_first() else {
        return Err(anyhow!("Empty command"));
    };

    let command = match (name.to_lowercase().as_str(), rest) {
        ("connect", [kind]) => Command::Connect(kind.parse()?),
        ("disconnect", []) => Command::Disconnect,
        ("balance", []) => Command::Balance,
        ("tokens", []) => Command::Tokens,
        ("holdings", []) => Command::Holdings,
        ("create", [name, symbol, decimals, supply]) => Command::Create {
            name: name.clone(),
            symbol: symbol.clone(),
            decimals: decimals
                .parse()
                .map_err(|_| anyhow!("Invalid decimals: {}", decimals))?,
            initial_supply: amount_arg(supply)?,
        },
        ("mint", [mint, amount, recipient]) => Command::Mint {
            mint_address: mint.clone(),
            amount: amount_arg(amount)?,
            recipient: recipient.clone(),
        },
        ("send", [mint, amount, recipient]) => Command::Send {
            mint_address: mint.clone(),
            amount: amount_arg(amount)?,
            recipient: recipient.clone(),
        },
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => return Err(anyhow!("Unknown command or wrong arguments: {}", other)),
    };

    Ok(command)
}
