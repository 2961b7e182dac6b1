//! Baked-in signature manifest.
//!
//! Built once on first use and read-only afterwards.

use lazy_static::lazy_static;

use crate::{models::SignatureType, services::signature::SignatureRegistry};

use SignatureType::{Event, Func};

const MANIFEST: &[(SignatureType, &str)] = &[
	// ERC-20
	(Event, "event Transfer(address indexed from, address indexed to, uint256 value)"),
	(Event, "event Approval(address indexed owner, address indexed spender, uint256 value)"),
	(Func, "function transfer(address to, uint256 amount)"),
	(Func, "function transferFrom(address from, address to, uint256 amount)"),
	(Func, "function approve(address spender, uint256 amount)"),
	(Func, "function mint(address to, uint256 amount)"),
	// ERC-721
	(Event, "event Transfer(address indexed from, address indexed to, uint256 indexed tokenId)"),
	(Event, "event ApprovalForAll(address indexed owner, address indexed operator, bool approved)"),
	(Func, "function safeTransferFrom(address from, address to, uint256 tokenId)"),
	(Func, "function safeTransferFrom(address from, address to, uint256 tokenId, bytes data)"),
	(Func, "function setApprovalForAll(address operator, bool approved)"),
	// ERC-1155
	(
		Event,
		"event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value)",
	),
	(
		Event,
		"event TransferBatch(address indexed operator, address indexed from, address indexed to, uint256[] ids, uint256[] values)",
	),
	// Wrapped native token
	(Event, "event Deposit(address indexed dst, uint256 wad)"),
	(Event, "event Withdrawal(address indexed src, uint256 wad)"),
	(Func, "function deposit()"),
	(Func, "function withdraw(uint256 wad)"),
	// AMM pools
	(
		Event,
		"event Swap(address indexed sender, uint256 amount0In, uint256 amount1In, uint256 amount0Out, uint256 amount1Out, address indexed to)",
	),
	(
		Event,
		"event Swap(address indexed sender, address indexed recipient, int256 amount0, int256 amount1, uint160 sqrtPriceX96, uint128 liquidity, int24 tick)",
	),
	(Event, "event Mint(address indexed sender, uint256 amount0, uint256 amount1)"),
	// Governance
	(
		Event,
		"event VoteCast(address indexed voter, uint256 proposalId, uint8 support, uint256 weight, string reason)",
	),
	(Event, "event DelegateChanged(address indexed delegator, address indexed fromDelegate, address indexed toDelegate)"),
	(Func, "function castVote(uint256 proposalId, uint8 support)"),
	(Func, "function castVoteWithReason(uint256 proposalId, uint8 support, string reason)"),
	(Func, "function delegate(address delegatee)"),
	// Naming
	(
		Event,
		"event NameRegistered(string name, bytes32 indexed label, address indexed owner, uint256 cost, uint256 expires)",
	),
	// Access control
	(Event, "event OwnershipTransferred(address indexed previousOwner, address indexed newOwner)"),
	// Batching
	(Func, "function multicall(bytes[] data)"),
];

lazy_static! {
	static ref STATIC_CATALOG: SignatureRegistry = SignatureRegistry::from_manifest(MANIFEST);
}

/// The process-wide catalog built from the baked-in manifest.
pub fn static_catalog() -> &'static SignatureRegistry {
	&STATIC_CATALOG
}
