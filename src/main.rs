use bentry::{Entry, EntryError};

fn main() -> Result<(), EntryError> {
    let mut torrent = Entry::default();
    torrent["announce"] = Entry::from("http://tracker.example.com/announce");
    torrent["info"]["name"] = Entry::from("file.txt");
    torrent["info"]["piece length"] = Entry::from(16384);
    torrent["info"]["length"] = Entry::from(1024);
    torrent["info"]["pieces"] = Entry::from(vec![0xdeu8, 0xad, 0xbe, 0xef]);
    torrent["url-list"] = Entry::List(vec![Entry::from("http://mirror.example.com/file.txt")]);

    // Canonical order is per level
    torrent.sort()?;
    torrent.at_mut("info")?.sort()?;

    print!("{}", torrent);
    Ok(())
}
