use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    OwnerOnly = 100,
    NotTokenOwner = 101,
    InsufficientBalance = 102,
    AlreadyInitialized = 104,
    SupplyOverflow = 105,
}
