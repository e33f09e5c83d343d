use pastecurl::store::{HistoryRequest, HistoryStore, MemoryStore};
use pastecurl::{RequestData, parse};

fn main() -> pastecurl::Result<()> {
    let curl_command = "curl 'http://example.com/api?page=2' \
        -H 'Accept: application/json' -d '{\"q\":\"rust\"}'";
    let parsed = parse(curl_command);
    println!("{:#?}", parsed);

    let mut history = HistoryStore::open(MemoryStore::new());
    history.add(HistoryRequest::from(&parsed))?;

    let request = RequestData::try_from(parsed)?;
    println!("{:?} {} -> {:?}", request.method, request.url, request.body.body_type);
    println!("{} request(s) in history", history.all().len());
    Ok(())
}
