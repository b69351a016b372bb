use giveaway_codec::{
    claim_prize_call, create_giveaway_call, decode, encode, felt_to_string, hash_claim_code,
    hash_service, hex_to_felt, lookup_by_address, lookup_by_felt, GiveawayDraft, GiveawayError,
    GiveawayInfo, GiveawayStatus, HashGatewayClient, HashServiceState, NumericInput,
    PrizeClaimedEvent, Winner,
};
use giveaway_codec::string_to_felt;
use giveaway_codec::Felt;
use std::time::Duration;
use tokio::net::TcpListener;

const CONTRACT: &str = "0x05a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f";

async fn start_hash_service() -> HashGatewayClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(hash_service::serve_on(
        listener,
        HashServiceState {
            max_codes_per_request: 100,
        },
    ));
    HashGatewayClient::new(&format!("http://{}/api/hash-codes", addr), Duration::from_secs(5)).unwrap()
}

fn usdc_draft() -> GiveawayDraft {
    GiveawayDraft {
        name: "Launch Week".to_string(),
        token_symbol: "USDC".to_string(),
        total_amount: "100".to_string(),
        winners: vec![
            Winner {
                code: "STRK-FIRST001".to_string(),
                amount: "50".to_string(),
            },
            Winner {
                code: "STRK-SECOND02".to_string(),
                amount: "30.25".to_string(),
            },
            Winner {
                code: "STRK-THIRD003".to_string(),
                amount: "19.75".to_string(),
            },
        ],
        expiry_hours: 72,
    }
}

#[tokio::test]
async fn create_giveaway_end_to_end() {
    let gateway = start_hash_service().await;
    let draft = usdc_draft();
    draft.validate().unwrap();

    let hashes = gateway.hash_claim_codes(&draft.codes()).await.unwrap();
    for (winner, hash) in draft.winners.iter().zip(&hashes) {
        assert_eq!(*hash, hash_claim_code(&winner.code));
    }

    let call = create_giveaway_call(CONTRACT, &draft, &hashes).unwrap();
    let data = &call.calldata;

    assert_eq!(felt_to_string(data[0].as_str()), "Launch Week");
    assert_eq!(lookup_by_address(&data[1]).unwrap().symbol, "USDC");
    assert_eq!(decode(data[2].as_str(), data[3].as_str(), 6), "100");
    assert_eq!(data[4], "3");
    // three hashes, then the prize array
    assert_eq!(data[8], "3");
    let prizes: Vec<String> = data[9..15]
        .chunks(2)
        .map(|limbs| decode(limbs[0].as_str(), limbs[1].as_str(), 6))
        .collect();
    assert_eq!(prizes, vec!["50", "30.25", "19.75"]);
    assert_eq!(data[15], "72");
    assert_eq!(data.len(), 16);
}

#[tokio::test]
async fn invalid_draft_never_reaches_hash_service() {
    let gateway = HashGatewayClient::new("http://127.0.0.1:9/api/hash-codes", Duration::from_secs(1)).unwrap();
    let mut draft = usdc_draft();
    draft.winners[0].code = "a claim code that is far too long for a felt".to_string();

    assert!(matches!(draft.validate(), Err(GiveawayError::TooLong { .. })));
    assert!(matches!(
        gateway.hash_claim_codes(&draft.codes()).await,
        Err(GiveawayError::TooLong { .. })
    ));
}

#[tokio::test]
async fn hash_service_down_aborts_creation() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HashGatewayClient::new(&format!("http://{}/api/hash-codes", addr), Duration::from_secs(1)).unwrap();
    let draft = usdc_draft();
    let result = gateway.hash_claim_codes(&draft.codes()).await;
    assert!(matches!(result, Err(GiveawayError::HashServiceUnavailable(_))));
}

#[test]
fn claim_and_read_back() {
    let call = claim_prize_call(CONTRACT, "Launch Week", "STRK-SECOND02").unwrap();
    assert_eq!(felt_to_string(call.calldata[1].as_str()), "STRK-SECOND02");

    // Event emitted by the contract after a successful claim
    let amount = encode("30.25", 6).unwrap();
    let data: Vec<NumericInput> = vec![
        NumericInput::from(1u64),
        NumericInput::from(hash_claim_code("STRK-SECOND02")),
        NumericInput::from("0x0777"),
        NumericInput::from(format!("{:#x}", amount.low)),
        NumericInput::from(amount.high.to_string()),
    ];
    let event = PrizeClaimedEvent::from_data(&data).unwrap();
    assert_eq!(event.display_amount(6), "30.25");
    assert_eq!(event.code_hash, Some(hash_claim_code("STRK-SECOND02")));

    // Giveaway state after one of three prizes is claimed
    let total = encode("100", 6).unwrap();
    let felts = vec![
        string_to_felt("Launch Week"),
        Felt::from(0x777u64),
        Felt::from(total.low),
        Felt::from(total.high),
        Felt::from(3u64),
        Felt::from(1u64),
        Felt::from(amount.low),
        Felt::from(amount.high),
        Felt::from(4_000_000_000u64),
        Felt::ONE,
    ];
    let info = GiveawayInfo::from_felts(&felts).unwrap();
    assert_eq!(info.display_name(), "Launch Week");
    assert_eq!(info.display_total(6), "100");
    assert_eq!(info.display_claimed(6), "30.25");
    assert_eq!(info.status_at(1_700_000_000), GiveawayStatus::Active);
}

#[test]
fn token_address_from_chain_is_unpadded() {
    let from_chain = hex_to_felt("0x53c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8").unwrap();
    assert_eq!(lookup_by_felt(&from_chain).unwrap().symbol, "USDC");
}
