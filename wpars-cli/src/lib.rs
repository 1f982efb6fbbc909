pub mod file_lock;
pub mod output;

use std::fs::File;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, warn};
use wpars::netif::{self, AddressMode, InterfaceInfo, Ipv4Config, MacAddr};
use wpars::{ConnectRequest, StationConfig, WifiStation};

use crate::file_lock::acquire_interface_lock;

/// Interface used when `-i` is not given.
pub const DEFAULT_INTERFACE: &str = "wlan0";

/// Upper bound on scan results shown.
pub const DEFAULT_SCAN_CAPACITY: usize = 1024;

#[derive(Parser, Debug)]
#[command(name = "wpars")]
#[command(version)]
#[command(about = "Manage Wi-Fi station interfaces through wpa_supplicant")]
pub struct Args {
    /// Network interface (default: all interfaces for `info`, wlan0 otherwise)
    #[arg(short = 'i', long = "interface", value_name = "IFACE", global = true)]
    pub interface: Option<String>,

    /// Output as JSON
    #[arg(short = 'j', long = "json", global = true)]
    pub json: bool,

    /// wpa_supplicant control socket directory
    #[arg(long = "ctrl-dir", value_name = "DIR", global = true)]
    pub ctrl_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Obtain the IPv4 address with DHCP (default)
    #[arg(short = 'a', long = "dhcp", global = true)]
    pub dhcp: bool,

    /// Static IPv4 address
    #[arg(short = '4', long = "ipv4", value_name = "ADDR", global = true)]
    pub ipv4: Option<String>,

    /// IPv4 netmask for --ipv4
    #[arg(
        short = 'n',
        long = "netmask",
        value_name = "MASK",
        default_value = "255.255.255.0",
        global = true
    )]
    pub netmask: String,

    /// Flush IPv4 addresses instead of assigning one
    #[arg(short = 'f', long = "flush", global = true)]
    pub flush: bool,

    /// Assign a random MAC address
    #[arg(short = 'r', long = "random-mac", global = true)]
    pub random_mac: bool,

    /// Save the network configuration on success
    #[arg(short = 's', long = "save", global = true)]
    pub save: bool,

    /// Read the PSK from a prompt
    #[arg(short = 'q', long = "prompt-psk", global = true)]
    pub prompt_psk: bool,

    /// Seconds to wait for the connection
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECS",
        default_value_t = 10,
        global = true
    )]
    pub timeout: u32,

    /// DHCP lease timeout in seconds
    #[arg(long = "dhcp-timeout", value_name = "SECS", default_value_t = 30, global = true)]
    pub dhcp_timeout: u32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Assign an IPv4 address
    Ip,
    /// Assign a MAC address
    Mac {
        /// Address such as 02:11:22:33:44:55
        address: Option<String>,
    },
    /// Scan for networks
    Scan {
        /// Maximum number of results
        #[arg(long = "max", value_name = "N", default_value_t = DEFAULT_SCAN_CAPACITY)]
        max: usize,
    },
    /// Show interface addresses (default command)
    Info,
    /// Connect to a network
    Connect {
        ssid: String,
        /// Omit for open networks or with --prompt-psk
        psk: Option<String>,
    },
    /// Disconnect from the current network
    Disconnect,
    /// Show the Wi-Fi station state
    #[command(name = "sta-info", alias = "sta_info")]
    StaInfo,
}

impl Args {
    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or(DEFAULT_INTERFACE)
    }

    /// Flush wins over a static address, which wins over DHCP.
    pub fn address_mode(&self) -> anyhow::Result<AddressMode> {
        if self.flush {
            return Ok(AddressMode::Flush);
        }
        match (&self.ipv4, self.dhcp) {
            (Some(addr), false) => {
                let config = Ipv4Config::parse(addr, Some(&self.netmask))?;
                Ok(AddressMode::Static(config))
            }
            _ => Ok(AddressMode::Dhcp {
                timeout_secs: self.dhcp_timeout,
            }),
        }
    }

    pub fn station_config(&self) -> StationConfig {
        match &self.ctrl_dir {
            Some(dir) => StationConfig::new().with_ctrl_dir(dir),
            None => StationConfig::new(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    execute(&args)
}

pub fn execute(args: &Args) -> anyhow::Result<()> {
    match args.command.clone().unwrap_or(Commands::Info) {
        Commands::Info => show_interfaces(args),
        Commands::Ip => {
            let _lock = lock(args.interface())?;
            assign_address(args)
        }
        Commands::Mac { address } => {
            let _lock = lock(args.interface())?;
            assign_mac(args, address.as_deref())
        }
        Commands::Scan { max } => {
            let _lock = lock(args.interface())?;
            scan(args, max)
        }
        Commands::Connect { ssid, psk } => {
            let _lock = lock(args.interface())?;
            connect(args, &ssid, psk)
        }
        Commands::Disconnect => {
            let _lock = lock(args.interface())?;
            disconnect(args)
        }
        Commands::StaInfo => station_info(args),
    }
}

fn lock(ifname: &str) -> anyhow::Result<File> {
    acquire_interface_lock(ifname).map_err(|e| anyhow!(e))
}

fn open_station(args: &Args) -> anyhow::Result<WifiStation> {
    WifiStation::with_config(args.interface(), args.station_config())
        .with_context(|| format!("Failed to open wpa_supplicant control socket for {}", args.interface()))
}

/// Prints without a newline so the result can follow on the same line.
fn progress(args: &Args, message: &str) {
    if !args.json {
        print!("{message}");
        let _ = io::stdout().flush();
    }
}

fn done(args: &Args, ok: bool) {
    if !args.json {
        println!("{}", if ok { "OK" } else { "failed" });
    }
}

fn show_interfaces(args: &Args) -> anyhow::Result<()> {
    let names = match &args.interface {
        Some(ifname) => vec![ifname.clone()],
        None => netif::list_interfaces().context("Failed to list interfaces")?,
    };

    let interfaces = names
        .iter()
        .map(|name| netif::interface_info(name))
        .collect::<Result<Vec<InterfaceInfo>, _>>()?;

    if args.json {
        println!("{}", output::interface_info_json(&interfaces)?);
    } else {
        print!("{}", output::interface_info(&interfaces));
    }
    Ok(())
}

fn assign_address(args: &Args) -> anyhow::Result<()> {
    let ifname = args.interface();
    let mode = args.address_mode()?;

    if let AddressMode::Dhcp { .. } = mode {
        progress(args, "Assigning DHCP address...");
    }

    let result = netif::apply(ifname, &mode);
    done(args, result.is_ok());
    result.with_context(|| format!("Failed to configure IPv4 on {ifname}"))
}

fn assign_mac(args: &Args, address: Option<&str>) -> anyhow::Result<()> {
    let ifname = args.interface();

    let mac = if args.random_mac {
        netif::randomize_mac(ifname)?
    } else {
        let mac: MacAddr = address
            .ok_or_else(|| anyhow!("a MAC address or --random-mac is required"))?
            .parse()?;
        netif::set_mac(ifname, &mac)?;
        mac
    };

    if args.json {
        println!("{}", output::to_json(&netif::interface_info(ifname)?)?);
    } else {
        println!("{ifname}: MAC set to {mac}");
    }
    Ok(())
}

fn scan(args: &Args, max: usize) -> anyhow::Result<()> {
    let mut station = open_station(args)?;
    let networks = station
        .scan(max)
        .with_context(|| format!("Scan on {} failed", args.interface()))?;
    station.close();

    if args.json {
        println!("{}", output::to_json(&networks)?);
    } else {
        print!("{}", output::scan_table(&networks));
    }
    Ok(())
}

/// Prompts for the PSK without echo on a terminal; piped input is read as
/// one line.
fn read_psk() -> anyhow::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return rpassword::prompt_password("PSK: ").context("Failed to read PSK");
    }
    read_psk_line(stdin.lock())
}

fn read_psk_line(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read PSK")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn connect(args: &Args, ssid: &str, psk: Option<String>) -> anyhow::Result<()> {
    let psk = match psk {
        Some(psk) => psk,
        None if args.prompt_psk => read_psk()?,
        None => String::new(),
    };

    let request = ConnectRequest::new(ssid)
        .psk(psk)
        .timeout_secs(args.timeout)
        .remove_all(true);

    let mut station = open_station(args)?;

    progress(args, &format!("Connecting to {ssid}..."));
    let result = station.connect(&request);
    done(args, result.is_ok());
    let info = result.with_context(|| format!("Failed to connect to {ssid}"))?;

    assign_address(args)?;

    if args.save {
        progress(args, "Saving configuration...");
        let saved = station.save_config();
        done(args, saved.is_ok());
        saved.context("Failed to save configuration")?;
    }

    if args.json {
        println!("{}", output::to_json(&info)?);
    }
    info!("Connected {} to {ssid}", args.interface());
    Ok(())
}

fn disconnect(args: &Args) -> anyhow::Result<()> {
    let mut station = open_station(args)?;
    let info = station.disconnect().context("Failed to disconnect")?;
    station.close();

    if let Err(e) = netif::flush_ipv4(args.interface()) {
        warn!("Failed to flush IPv4 on {}: {e}", args.interface());
    }

    if args.json {
        println!("{}", output::to_json(&info)?);
    } else {
        println!("OK");
    }
    Ok(())
}

fn station_info(args: &Args) -> anyhow::Result<()> {
    let mut station = open_station(args)?;
    let info = station.info().context("Failed to read station state")?;

    if args.json {
        println!("{}", output::to_json(&info)?);
    } else {
        print!("{}", output::station_info(&info));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::net::Ipv4Addr;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_info_on_wlan0() {
        let args = parse(&["wpars"]);
        assert!(args.command.is_none());
        assert_eq!(args.interface(), "wlan0");
        assert_eq!(args.timeout, 10);
        assert!(!args.json);
    }

    #[test]
    fn global_flags_before_and_after_subcommand() {
        let before = parse(&["wpars", "-i", "wlp2s0", "-j", "scan"]);
        assert_eq!(before.interface(), "wlp2s0");
        assert!(before.json);
        assert_eq!(
            before.command,
            Some(Commands::Scan {
                max: DEFAULT_SCAN_CAPACITY
            })
        );

        let after = parse(&["wpars", "connect", "Home", "secret123", "-s", "-t", "20"]);
        assert!(after.save);
        assert_eq!(after.timeout, 20);
        assert_eq!(
            after.command,
            Some(Commands::Connect {
                ssid: "Home".into(),
                psk: Some("secret123".into())
            })
        );
    }

    #[test]
    fn sta_info_alias() {
        assert_eq!(parse(&["wpars", "sta_info"]).command, Some(Commands::StaInfo));
        assert_eq!(parse(&["wpars", "sta-info"]).command, Some(Commands::StaInfo));
    }

    #[test]
    fn negative_timeout_is_rejected() {
        assert!(Args::try_parse_from(["wpars", "connect", "Home", "-t", "-5"]).is_err());
    }

    #[test]
    fn connect_requires_ssid() {
        assert!(Args::try_parse_from(["wpars", "connect"]).is_err());
    }

    #[test]
    fn address_mode_defaults_to_dhcp() {
        let args = parse(&["wpars", "ip"]);
        assert_eq!(
            args.address_mode().unwrap(),
            AddressMode::Dhcp { timeout_secs: 30 }
        );
    }

    #[test]
    fn static_address_with_default_netmask() {
        let args = parse(&["wpars", "-4", "192.168.1.40", "ip"]);
        match args.address_mode().unwrap() {
            AddressMode::Static(config) => {
                assert_eq!(config.address, Ipv4Addr::new(192, 168, 1, 40));
                assert_eq!(config.netmask, Ipv4Addr::new(255, 255, 255, 0));
            }
            other => panic!("unexpected mode {other:?}"),
        }

        let args = parse(&["wpars", "-4", "10.0.0.9", "-n", "255.0.0.0", "ip"]);
        assert!(matches!(
            args.address_mode().unwrap(),
            AddressMode::Static(c) if c.prefix_len() == 8
        ));
    }

    #[test]
    fn piped_psk_is_one_line() {
        let psk = read_psk_line(&b"hunter22\r\nnext line\n"[..]).unwrap();
        assert_eq!(psk, "hunter22");
        assert_eq!(read_psk_line(&b""[..]).unwrap(), "");
    }

    #[test]
    fn flush_wins() {
        let args = parse(&["wpars", "-f", "-4", "10.0.0.9", "ip"]);
        assert_eq!(args.address_mode().unwrap(), AddressMode::Flush);
    }

    #[test]
    fn invalid_static_address_is_an_error() {
        let args = parse(&["wpars", "-4", "999.0.0.1", "ip"]);
        assert!(args.address_mode().is_err());
    }

    #[test]
    fn ctrl_dir_flows_into_config() {
        let args = parse(&["wpars", "--ctrl-dir", "/tmp/wpa", "sta-info"]);
        assert_eq!(
            args.station_config().ctrl_dir,
            Some(PathBuf::from("/tmp/wpa"))
        );
        assert!(parse(&["wpars"]).station_config().ctrl_dir.is_none());
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["wpars", "-vv", "info"]).verbose, 2);
    }

    #[test]
    fn mac_without_address_or_random_fails() {
        let args = parse(&["wpars", "-i", "wpnotthere0", "mac"]);
        assert!(assign_mac(&args, None).is_err());
    }
}
