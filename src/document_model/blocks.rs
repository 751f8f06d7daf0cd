/// Split markdown source into blocks separated by blank lines.
///
/// Lines inside a fenced code block never end a block, even when blank.
/// Blank lines only separate; they never produce an empty block.
pub fn split_into_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current_block: Vec<&str> = Vec::new();
    let mut in_code_block = false;

    for line in content.lines() {
        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
            current_block.push(line);
            continue;
        }

        if in_code_block {
            current_block.push(line);
            continue;
        }

        if line.trim().is_empty() {
            if !current_block.is_empty() {
                blocks.push(current_block.join("\n"));
                current_block.clear();
            }
        } else {
            current_block.push(line);
        }
    }

    if !current_block.is_empty() {
        blocks.push(current_block.join("\n"));
    }

    blocks
}
