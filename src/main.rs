use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    ollama_assistant::cli::main()
}
