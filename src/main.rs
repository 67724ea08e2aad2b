use clap::{arg,crate_version,Command};
use suffix_bwt_huff::{config::STD_CONFIG,stream};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Encode:  `suffix-bwt-huff encode -i my_text -o my_text.sbh`
Decode:  `suffix-bwt-huff decode -i my_text.sbh -o my_text`";

    let mut main_cmd = Command::new("suffix-bwt-huff")
        .about("Compress and expand text with a suffix-tree BWT + Huffman/Elias codec")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("encode")
        .arg(arg!(-i --input <PATH> "input path, must end in a single '$'").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("encode a file"));
    main_cmd = main_cmd.subcommand(Command::new("decode")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("decode a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("encode") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let encoded = stream::encode(&dat,&STD_CONFIG)?;
        std::fs::write(path_out,encoded)?;
    }

    if let Some(cmd) = matches.subcommand_matches("decode") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let decoded = stream::decode(&dat,&STD_CONFIG)?;
        std::fs::write(path_out,decoded)?;
    }

    Ok(())
}
