use std::fmt;

/// Why a script run aborted, independent of the free-text message.
///
/// Hosts map these to their own exit statuses or logs. Codes:
/// - -1: no cause recorded
/// - 1xx: failures raised by host-registered functions (file, stash, patch ...)
/// - 200: I/O and vendor failures
/// - 3xx: failures raised by the evaluator itself
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CauseCode {
    /// Nothing classified the failure.
    #[default]
    NoCause,
    /// Wrong argument count or an argument of the wrong shape.
    ArgsParsingFailure,
    StashCreationFailure,
    FileOpenFailure,
    LseekFailure,
    FreadFailure,
    FwriteFailure,
    FsyncFailure,
    LibfecFailure,
    FileGetPropFailure,
    FileRenameFailure,
    SymlinkFailure,
    SetMetadataFailure,
    Tune2FsFailure,
    RebootFailure,
    PackageExtractFileFailure,
    PatchApplicationFailure,
    HashTreeComputationFailure,
    EioFailure,
    /// Shares code 200 with `EioFailure`.
    VendorFailure,
    /// A call named a function missing from the function table.
    UnknownFunction,
    /// An `assert` condition evaluated to false.
    AssertionFailure,
    /// The state's nesting limit was exceeded.
    RecursionLimit,
}

impl CauseCode {
    /// Every cause, in code order.
    pub const ALL: [CauseCode; 23] = [
        CauseCode::NoCause,
        CauseCode::ArgsParsingFailure,
        CauseCode::StashCreationFailure,
        CauseCode::FileOpenFailure,
        CauseCode::LseekFailure,
        CauseCode::FreadFailure,
        CauseCode::FwriteFailure,
        CauseCode::FsyncFailure,
        CauseCode::LibfecFailure,
        CauseCode::FileGetPropFailure,
        CauseCode::FileRenameFailure,
        CauseCode::SymlinkFailure,
        CauseCode::SetMetadataFailure,
        CauseCode::Tune2FsFailure,
        CauseCode::RebootFailure,
        CauseCode::PackageExtractFileFailure,
        CauseCode::PatchApplicationFailure,
        CauseCode::HashTreeComputationFailure,
        CauseCode::EioFailure,
        CauseCode::VendorFailure,
        CauseCode::UnknownFunction,
        CauseCode::AssertionFailure,
        CauseCode::RecursionLimit,
    ];

    /// Stable integer code reported to hosts.
    pub const fn code(self) -> i32 {
        match self {
            CauseCode::NoCause => -1,
            CauseCode::ArgsParsingFailure => 100,
            CauseCode::StashCreationFailure => 101,
            CauseCode::FileOpenFailure => 102,
            CauseCode::LseekFailure => 103,
            CauseCode::FreadFailure => 104,
            CauseCode::FwriteFailure => 105,
            CauseCode::FsyncFailure => 106,
            CauseCode::LibfecFailure => 107,
            CauseCode::FileGetPropFailure => 108,
            CauseCode::FileRenameFailure => 109,
            CauseCode::SymlinkFailure => 110,
            CauseCode::SetMetadataFailure => 111,
            CauseCode::Tune2FsFailure => 112,
            CauseCode::RebootFailure => 113,
            CauseCode::PackageExtractFileFailure => 114,
            CauseCode::PatchApplicationFailure => 115,
            CauseCode::HashTreeComputationFailure => 116,
            CauseCode::EioFailure | CauseCode::VendorFailure => 200,
            CauseCode::UnknownFunction => 300,
            CauseCode::AssertionFailure => 301,
            CauseCode::RecursionLimit => 302,
        }
    }

    /// Look a cause up by its integer code.
    ///
    /// Code 200 resolves to `EioFailure`.
    pub fn from_code(code: i32) -> Option<CauseCode> {
        CauseCode::ALL.into_iter().find(|cause| cause.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CauseCode::NoCause => "no_cause",
            CauseCode::ArgsParsingFailure => "args_parsing_failure",
            CauseCode::StashCreationFailure => "stash_creation_failure",
            CauseCode::FileOpenFailure => "file_open_failure",
            CauseCode::LseekFailure => "lseek_failure",
            CauseCode::FreadFailure => "fread_failure",
            CauseCode::FwriteFailure => "fwrite_failure",
            CauseCode::FsyncFailure => "fsync_failure",
            CauseCode::LibfecFailure => "libfec_failure",
            CauseCode::FileGetPropFailure => "file_getprop_failure",
            CauseCode::FileRenameFailure => "file_rename_failure",
            CauseCode::SymlinkFailure => "symlink_failure",
            CauseCode::SetMetadataFailure => "set_metadata_failure",
            CauseCode::Tune2FsFailure => "tune2fs_failure",
            CauseCode::RebootFailure => "reboot_failure",
            CauseCode::PackageExtractFileFailure => "package_extract_file_failure",
            CauseCode::PatchApplicationFailure => "patch_application_failure",
            CauseCode::HashTreeComputationFailure => "hash_tree_computation_failure",
            CauseCode::EioFailure => "eio_failure",
            CauseCode::VendorFailure => "vendor_failure",
            CauseCode::UnknownFunction => "unknown_function",
            CauseCode::AssertionFailure => "assertion_failure",
            CauseCode::RecursionLimit => "recursion_limit",
        }
    }

    /// Whether anything classified the failure.
    #[inline]
    pub fn is_specified(self) -> bool {
        self != CauseCode::NoCause
    }
}

impl fmt::Display for CauseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}
