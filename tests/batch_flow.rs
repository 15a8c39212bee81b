//! End-to-end batch flows and byte-for-byte agreement with the reference
//! program crates.

use wasm_spl_batch::builder::{build_transaction, BatchIntent};
use wasm_spl_batch::instructions::{
    self, InstructionDescriptor, SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID, TOKEN_PROGRAM_ID,
};
use wasm_spl_batch::rent::{self, AccountKind, DefaultRent};
use wasm_spl_batch::{
    associated_token_address, parse_transaction, Batch, BatchError, FreezeAuthority,
    FreshnessToken, Keypair, KeypairExt, ParsedInstruction, Pubkey, TokenInstruction,
    TransactionExt,
};

use solana_sdk::hash::Hash;
use solana_signer::Signer;

const BLOCKHASH: &str = "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn keypair(seed: u8) -> Keypair {
    Keypair::from_secret_key_bytes(&[seed; 32]).unwrap()
}

/// (pubkey bytes, is_signer, is_writable) for each account of a descriptor.
fn metas(ix: &InstructionDescriptor) -> Vec<([u8; 32], bool, bool)> {
    ix.accounts()
        .iter()
        .map(|a| (a.pubkey.to_bytes(), a.is_signer, a.is_writable))
        .collect()
}

#[test]
fn allocate_and_initialize_mint() {
    init_tracing();
    let payer = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    let mut batch = Batch::with_fee_payer(payer);
    batch
        .append(rent::create_account_for(&DefaultRent, AccountKind::Mint, &payer, &mint).unwrap())
        .unwrap();
    batch
        .append(instructions::initialize_mint(&mint, 9, &payer, FreezeAuthority::None).unwrap())
        .unwrap();
    batch.finalize(BLOCKHASH.parse().unwrap()).unwrap();

    let payloads: Vec<usize> = batch.instructions().iter().map(|ix| ix.data().len()).collect();
    assert_eq!(payloads, vec![52, 35]);
    assert_eq!(batch.required_signers(), vec![payer, mint]);

    let allocate = &batch.instructions()[0];
    assert_eq!(allocate.program_id(), &SYSTEM_PROGRAM_ID);
    assert_eq!(&allocate.data()[..4], &[0, 0, 0, 0]);
    assert_eq!(&allocate.data()[4..12], &1_461_600u64.to_le_bytes());
    assert_eq!(&allocate.data()[12..20], &82u64.to_le_bytes());
    assert_eq!(&allocate.data()[20..52], &TOKEN_PROGRAM_ID.to_bytes());

    let init = &batch.instructions()[1];
    assert_eq!(init.data()[0], 0);
    assert_eq!(init.data()[1], 9);
    assert_eq!(&init.data()[2..34], &payer.to_bytes());
    assert_eq!(init.data()[34], 0);
    assert_eq!(init.accounts()[1].pubkey, SYSVAR_RENT_ID);
}

#[test]
fn full_mint_and_transfer_flow_signs_and_parses() {
    init_tracing();
    let payer = keypair(1);
    let mint = keypair(2);
    let treasury = keypair(3);
    let recipient = keypair(4);
    let recipient_ata = associated_token_address(&recipient.pubkey(), &mint.pubkey());

    let mut batch = Batch::with_fee_payer(payer.pubkey());
    batch
        .extend([
            rent::create_account_for(
                &DefaultRent,
                AccountKind::Mint,
                &payer.pubkey(),
                &mint.pubkey(),
            )
            .unwrap(),
            instructions::initialize_mint(&mint.pubkey(), 6, &payer.pubkey(), FreezeAuthority::None)
                .unwrap(),
            rent::create_account_for(
                &DefaultRent,
                AccountKind::TokenAccount,
                &payer.pubkey(),
                &treasury.pubkey(),
            )
            .unwrap(),
            instructions::initialize_account(&treasury.pubkey(), &mint.pubkey(), &payer.pubkey())
                .unwrap(),
            instructions::mint_to(&mint.pubkey(), &treasury.pubkey(), &payer.pubkey(), 1_000_000u64)
                .unwrap(),
            instructions::transfer(&treasury.pubkey(), &recipient_ata, &payer.pubkey(), 250_000u64)
                .unwrap(),
        ])
        .unwrap();
    batch
        .finalize(FreshnessToken::new(Hash::new_from_array([7; 32])))
        .unwrap();

    assert_eq!(
        batch.required_signers(),
        vec![payer.pubkey(), mint.pubkey(), treasury.pubkey()]
    );
    assert_eq!(
        batch.sign(&[&payer, &mint]).unwrap_err(),
        BatchError::UnsatisfiedSigner(treasury.pubkey())
    );

    let tx = batch.sign(&[&payer, &mint, &treasury]).unwrap();
    assert!(tx.is_fully_signed());

    let parsed = parse_transaction(&tx.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed.fee_payer, payer.pubkey());
    assert_eq!(parsed.num_signatures, 3);
    let decoded: Vec<TokenInstruction> = batch
        .instructions()
        .iter()
        .map(|ix| TokenInstruction::decode(ix).unwrap())
        .collect();
    let reparsed: Vec<TokenInstruction> = parsed
        .instructions
        .into_iter()
        .map(|ix| match ix {
            ParsedInstruction::Token(ix) => ix,
            other => panic!("Expected token instruction, got {:?}", other),
        })
        .collect();
    assert_eq!(reparsed, decoded);
    assert_eq!(
        reparsed[5],
        TokenInstruction::Transfer {
            source: treasury.pubkey(),
            destination: recipient_ata,
            owner: payer.pubkey(),
            amount: 250_000,
        }
    );
}

#[test]
fn intent_round_trips_through_parser() {
    init_tracing();
    let payer = keypair(1).pubkey();
    let mint = keypair(2).pubkey();
    let account = keypair(3).pubkey();

    let intent: BatchIntent = serde_json::from_value(serde_json::json!({
        "feePayer": payer.to_string(),
        "recentBlockhash": BLOCKHASH,
        "instructions": [
            { "type": "createMintAccount", "payer": payer.to_string(), "mint": mint.to_string() },
            { "type": "initializeMint", "mint": mint.to_string(), "decimals": 9,
              "mintAuthority": payer.to_string(), "freezeAuthority": payer.to_string() },
            { "type": "createTokenAccount", "payer": payer.to_string(),
              "account": account.to_string() },
            { "type": "initializeAccount", "account": account.to_string(), "mint": mint.to_string(),
              "owner": payer.to_string() },
            { "type": "mintTo", "mint": mint.to_string(), "destination": account.to_string(),
              "authority": payer.to_string(), "amount": "18446744073709551615" },
        ],
    }))
    .unwrap();

    let bytes = build_transaction(intent).unwrap();
    let parsed = parse_transaction(&bytes).unwrap();

    assert_eq!(parsed.recent_blockhash.to_string(), BLOCKHASH);
    assert_eq!(parsed.signatures, vec![String::new(); 3]);
    assert_eq!(
        parsed.instructions,
        vec![
            ParsedInstruction::Token(TokenInstruction::CreateAccount {
                payer,
                new_account: mint,
                lamports: 1_461_600,
                space: 82,
                owner: TOKEN_PROGRAM_ID,
            }),
            ParsedInstruction::Token(TokenInstruction::InitializeMint {
                mint,
                decimals: 9,
                mint_authority: payer,
                freeze_authority: FreezeAuthority::Some(payer),
            }),
            ParsedInstruction::Token(TokenInstruction::CreateAccount {
                payer,
                new_account: account,
                lamports: 2_039_280,
                space: 165,
                owner: TOKEN_PROGRAM_ID,
            }),
            ParsedInstruction::Token(TokenInstruction::InitializeAccount {
                account,
                mint,
                owner: payer,
            }),
            ParsedInstruction::Token(TokenInstruction::MintTo {
                mint,
                destination: account,
                authority: payer,
                amount: u64::MAX,
            }),
        ]
    );
}

// =============================================================================
// Golden vectors against the reference program crates
// =============================================================================

mod golden {
    use super::*;
    use spl_token::solana_program::pubkey::Pubkey as SplPubkey;

    fn spl(key: &Pubkey) -> SplPubkey {
        SplPubkey::new_from_array(key.to_bytes())
    }

    fn spl_metas(
        ix: &spl_token::solana_program::instruction::Instruction,
    ) -> Vec<([u8; 32], bool, bool)> {
        ix.accounts
            .iter()
            .map(|a| (a.pubkey.to_bytes(), a.is_signer, a.is_writable))
            .collect()
    }

    #[test]
    fn create_account_matches_system_interface() {
        use solana_sdk::pubkey::Pubkey as SdkPubkey;

        let payer = Pubkey::new_unique();
        let new_account = Pubkey::new_unique();
        let ours =
            instructions::create_account(&payer, &new_account, 2_039_280u64, 165, &TOKEN_PROGRAM_ID)
                .unwrap();
        let theirs = solana_system_interface::instruction::create_account(
            &SdkPubkey::new_from_array(payer.to_bytes()),
            &SdkPubkey::new_from_array(new_account.to_bytes()),
            2_039_280,
            165,
            &SdkPubkey::new_from_array(TOKEN_PROGRAM_ID.to_bytes()),
        );

        assert_eq!(ours.data(), theirs.data.as_slice());
        assert_eq!(ours.program_id().to_bytes(), theirs.program_id.to_bytes());
        let their_metas: Vec<([u8; 32], bool, bool)> = theirs
            .accounts
            .iter()
            .map(|a| (a.pubkey.to_bytes(), a.is_signer, a.is_writable))
            .collect();
        assert_eq!(metas(&ours), their_metas);
    }

    #[test]
    fn initialize_mint_matches_spl_token() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let freeze = Pubkey::new_unique();

        for (ours_freeze, theirs_freeze) in [
            (FreezeAuthority::None, None),
            (FreezeAuthority::Some(freeze), Some(spl(&freeze))),
        ] {
            let ours = instructions::initialize_mint(&mint, 9, &authority, ours_freeze).unwrap();
            let theirs = spl_token::instruction::initialize_mint(
                &spl_token::id(),
                &spl(&mint),
                &spl(&authority),
                theirs_freeze.as_ref(),
                9,
            )
            .unwrap();

            assert_eq!(hex::encode(ours.data()), hex::encode(&theirs.data));
            assert_eq!(ours.program_id().to_bytes(), theirs.program_id.to_bytes());
            assert_eq!(metas(&ours), spl_metas(&theirs));
        }
    }

    #[test]
    fn initialize_account_matches_spl_token() {
        let account = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let ours = instructions::initialize_account(&account, &mint, &owner).unwrap();
        let theirs = spl_token::instruction::initialize_account(
            &spl_token::id(),
            &spl(&account),
            &spl(&mint),
            &spl(&owner),
        )
        .unwrap();

        assert_eq!(ours.data(), theirs.data.as_slice());
        assert_eq!(metas(&ours), spl_metas(&theirs));
    }

    #[test]
    fn mint_to_and_transfer_match_spl_token() {
        let mint = Pubkey::new_unique();
        let source = Pubkey::new_unique();
        let destination = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        for amount in [0u64, 1, 1_000_000, u64::MAX] {
            let ours = instructions::mint_to(&mint, &destination, &authority, amount).unwrap();
            let theirs = spl_token::instruction::mint_to(
                &spl_token::id(),
                &spl(&mint),
                &spl(&destination),
                &spl(&authority),
                &[],
                amount,
            )
            .unwrap();
            assert_eq!(ours.data(), theirs.data.as_slice());
            assert_eq!(metas(&ours), spl_metas(&theirs));

            #[allow(deprecated)]
            let theirs = spl_token::instruction::transfer(
                &spl_token::id(),
                &spl(&source),
                &spl(&destination),
                &spl(&authority),
                &[],
                amount,
            )
            .unwrap();
            let ours = instructions::transfer(&source, &destination, &authority, amount).unwrap();
            assert_eq!(ours.data(), theirs.data.as_slice());
            assert_eq!(metas(&ours), spl_metas(&theirs));
        }
    }
}
