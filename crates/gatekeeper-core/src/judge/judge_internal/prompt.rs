use crate::judge::policy::VerdictFormat;
use crate::model::{CandidateOutput, Task};

const CHECKLIST: &str = "\
### Checklist:
1. Does the output meet every requirement stated in the task?
2. Is the output in the correct format and structure for the task?";

const PREFIX_CONTRACT: &str = "\
### Response format:
Respond with exactly one line, in one of these two forms:
PASS: <reason>
FAIL: <reason>
Do not include any other text.";

const JSON_CONTRACT: &str = "\
### Response format:
Respond with exactly one JSON object and nothing else:
{\"verdict\": \"PASS\" or \"FAIL\", \"reason\": \"<reason>\"}";

pub(crate) fn build_prompt_impl(
    task: &Task,
    output: &CandidateOutput,
    format: VerdictFormat,
) -> String {
    let contract = match format {
        VerdictFormat::Prefix => PREFIX_CONTRACT,
        VerdictFormat::Json => JSON_CONTRACT,
    };
    format!(
        "Validate the following output against the task requirements.\n\n\
         ### Task: {}\n\n\
         ### Requirements:\n<requirements>\n{}\n</requirements>\n\n\
         ### Output:\n<output>\n{}\n</output>\n\n\
         {}\n\n\
         {}",
        task.title,
        task.description,
        output.as_str(),
        CHECKLIST,
        contract
    )
}
