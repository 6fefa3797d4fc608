/*
[INPUT]:  Operator commands from the binary entry point
[OUTPUT]: Setup wizard and hardware diagnostics
[POS]:    CLI module root
[UPDATE]: When adding operator subcommands
*/

pub mod diagnostics;
pub mod init;
