use clap::Parser;
use lsag_ring::solidity::{add_voters_args, anonymous_vote_args, create_vote_args};
use lsag_ring::{Election, ElectionConfig, Error, Parameters, Secp256k1, SecureRng};
use rand::Rng;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "vote")]
#[command(about = "Anonymous ring-signature election: prints voting contract arguments", long_about = None)]
#[command(version)]
struct Args {
    /// Number of candidates
    #[arg(short, long, env = "LSAG_CANDIDATES")]
    candidates: Option<usize>,

    /// Number of voters (ring size)
    #[arg(short, long, env = "LSAG_VOTERS")]
    voters: Option<usize>,

    /// Fixed session id instead of a random one
    #[arg(short, long, env = "LSAG_SESSION_ID")]
    session_id: Option<u64>,

    /// Cast a second ballot for the first voter to show double-vote detection
    #[arg(long)]
    double_vote: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ElectionConfig::from_env().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        info!("Using default configuration");
        ElectionConfig::default()
    });

    if let Some(candidates) = args.candidates {
        config.candidates = candidates;
    }
    if let Some(voters) = args.voters {
        config.voters = voters;
    }
    if args.session_id.is_some() {
        config.session_id = args.session_id;
    }

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {e}");
        return Err(e.into());
    }

    let params = Parameters::<Secp256k1>::new();
    let mut rng = SecureRng::new();
    let election = Election::from_config(params, &mut rng, &config)?;
    info!(
        session_id = election.session_id(),
        candidates = config.candidates,
        voters = config.voters,
        "election generated"
    );

    println!("arguments for createVote(...)");
    println!(
        "{}",
        create_vote_args(election.session_id(), election.candidates())
    );
    println!("arguments for addVotersToVote(...)");
    println!(
        "{}",
        add_voters_args(election.session_id(), election.ring(), config.voters, true)
    );

    let mut tally = election.tally();
    println!("arguments for VoteAnonymous(...)");
    for voter in 0..config.voters {
        let choice = rng.gen_range(0..config.candidates);
        let ballot = election.cast(&mut rng, voter, choice)?;
        tally.record(&ballot)?;

        println!();
        println!("Voter {voter} votes for candidate {}", ballot.candidate());
        println!(
            "{}",
            anonymous_vote_args(ballot.session_id(), ballot.candidate(), ballot.signature())
        );
    }

    if args.double_vote {
        let again = election.cast(&mut rng, 0, 0)?;
        match tally.record(&again) {
            Err(Error::DoubleVote(image)) => {
                warn!(key_image = %image, "second ballot of voter 0 refused")
            }
            Err(e) => return Err(e.into()),
            Ok(()) => return Err("second ballot of voter 0 was counted".into()),
        }
    }

    println!();
    println!("tally ({} ballots)", tally.total());
    for (candidate, votes) in tally.counts() {
        println!("{candidate}: {votes}");
    }

    Ok(())
}
